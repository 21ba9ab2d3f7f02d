//! Wave parameters shared by the buoyancy pass and the rendered surface.
//!
//! Both sides read the same `WaveConfig`, so a tuned value changes what
//! floating bodies feel and what the player sees in the same frame.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{OCEAN_BASE_Y, SURFACE_BIAS, WAVE_COMPONENTS, WIND_SPEED};

/// One sinusoidal contributor to the height field.
///
/// `frequency` must be positive; zero or negative values are a tuning bug
/// and are not checked here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct WaveComponent {
    /// Spatial frequency applied to both horizontal phase terms
    pub frequency: f32,
    /// Exponent scale of the component ("height" in the tuning panel)
    pub amplitude: f32,
}

impl WaveComponent {
    pub const fn new(frequency: f32, amplitude: f32) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }
}

impl Default for WaveComponent {
    fn default() -> Self {
        Self::new(0.01, 0.01)
    }
}

/// Complete height-field configuration.
/// Can be serialized into the settings file and edited live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct WaveConfig {
    /// Exactly three components; index 0 is the dominant one
    pub waves: [WaveComponent; WAVE_COMPONENTS],
    /// Scales the time term of every component
    pub wind_speed: f32,
    /// World Y of the ocean mesh
    pub base_level: f32,
    /// Added to the summed height before converting to world Y
    pub surface_bias: f32,
}

impl WaveConfig {
    pub fn new(waves: [WaveComponent; WAVE_COMPONENTS], wind_speed: f32) -> Self {
        Self {
            waves,
            wind_speed,
            base_level: OCEAN_BASE_Y,
            surface_bias: SURFACE_BIAS,
        }
    }

    pub fn with_base_level(mut self, base_level: f32) -> Self {
        self.base_level = base_level;
        self
    }

    pub fn with_surface_bias(mut self, surface_bias: f32) -> Self {
        self.surface_bias = surface_bias;
        self
    }

    /// Component at `index`, if it exists.
    pub fn component(&self, index: usize) -> Option<&WaveComponent> {
        self.waves.get(index)
    }

    pub fn component_mut(&mut self, index: usize) -> Option<&mut WaveComponent> {
        self.waves.get_mut(index)
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        WavePreset::default().to_config()
    }
}

/// Preset wave configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WavePreset {
    /// Barely moving water; what the ocean ships with
    #[default]
    Calm,
    /// Large, uneven swell
    Choppy,
    /// Zero amplitude everywhere
    Flat,
}

impl WavePreset {
    /// Create a WaveConfig from this preset.
    pub fn to_config(self) -> WaveConfig {
        match self {
            WavePreset::Calm => WaveConfig::new([WaveComponent::new(0.01, 0.01); 3], WIND_SPEED),
            WavePreset::Choppy => WaveConfig::new(
                [
                    WaveComponent::new(0.6, 0.8),
                    WaveComponent::new(0.2, 1.0),
                    WaveComponent::new(0.3, 0.5),
                ],
                WIND_SPEED,
            ),
            WavePreset::Flat => WaveConfig::new([WaveComponent::new(0.01, 0.0); 3], WIND_SPEED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_calm() {
        assert_eq!(WaveConfig::default(), WavePreset::Calm.to_config());
        assert_eq!(WaveConfig::default().base_level, OCEAN_BASE_Y);
    }

    #[test]
    fn test_flat_preset_has_no_amplitude() {
        let config = WavePreset::Flat.to_config();
        assert!(config.waves.iter().all(|wave| wave.amplitude == 0.0));
    }

    #[test]
    fn test_component_access_is_bounded() {
        let mut config = WavePreset::Choppy.to_config();
        assert_eq!(config.component(1), Some(&WaveComponent::new(0.2, 1.0)));
        assert!(config.component(3).is_none());

        if let Some(wave) = config.component_mut(2) {
            wave.frequency = 1.5;
        }
        assert_eq!(config.waves[2].frequency, 1.5);
    }
}
