//! Analytic height field evaluated on the CPU.
//!
//! Every component is an exponential wave: `2^(h·sin a + h·cos b) · 0.5`,
//! which gives sharper troughs and flatter crests than a raw sinusoid.
//! The x phase uses the squared x coordinate; tuned content depends on
//! that shape, so it is not a plane wave.

use bevy::math::Vec3;
use bevy::prelude::{ReflectResource, Reflect};
use bevy_ecs::prelude::Resource;
use std::f32::consts::LN_2;

use super::config::{WaveComponent, WaveConfig};
use crate::constants::DOMINANT_WAVE;

#[inline]
fn phases(component: &WaveComponent, wind_speed: f32, position: Vec3, time: f32) -> (f32, f32) {
    let drift = time * wind_speed;
    let a = position.x * position.x * component.frequency + drift;
    let b = position.z * component.frequency + drift;
    (a, b)
}

#[inline]
fn exponential_wave(amplitude: f32, a: f32, b: f32) -> f32 {
    2.0f32.powf(amplitude * a.sin() + amplitude * b.cos()) * 0.5
}

/// Height contribution of a single component at `position`.
#[inline]
pub fn wave_height(component: &WaveComponent, wind_speed: f32, position: Vec3, time: f32) -> f32 {
    let (a, b) = phases(component, wind_speed, position, time);
    exponential_wave(component.amplitude, a, b)
}

/// Slope of a single component along x.
#[inline]
pub fn partial_derivative_x(
    component: &WaveComponent,
    wind_speed: f32,
    position: Vec3,
    time: f32,
) -> f32 {
    let (a, b) = phases(component, wind_speed, position, time);
    let h = component.amplitude;
    exponential_wave(h, a, b) * LN_2 * h * component.frequency * a.cos()
}

/// Slope of a single component along z.
#[inline]
pub fn partial_derivative_z(
    component: &WaveComponent,
    wind_speed: f32,
    position: Vec3,
    time: f32,
) -> f32 {
    let (a, b) = phases(component, wind_speed, position, time);
    let h = component.amplitude;
    exponential_wave(h, a, b) * LN_2 * (-h * component.frequency * b.sin())
}

/// Normal of the height map from its slopes.
///
/// The y component is -1: the vector points into the body, which is the
/// direction the tilt torque is built from.
#[inline]
pub fn surface_normal(dx: f32, dz: f32) -> Vec3 {
    Vec3::new(dx, -1.0, dz).normalize()
}

/// Result of a height-field query at a single point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaveSample {
    /// Sum of the three components, mesh-local
    pub height: f32,
    /// World Y a floating body is pushed toward
    pub target_height: f32,
    /// Slope of the dominant component (d/dx, d/dz)
    pub slope: (f32, f32),
    /// Normal built from `slope`
    pub normal: Vec3,
}

/// The ocean's wave state: tunable parameters plus the simulation clock.
///
/// Owned by the simulation thread; tuning writes go through `config_mut`
/// on that same thread.
#[derive(Resource, Debug, Clone, Default, Reflect)]
#[reflect(Resource)]
pub struct WaveField {
    config: WaveConfig,
    elapsed: f32,
}

impl WaveField {
    pub fn new(config: WaveConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
        }
    }

    /// Field frozen at a given time, mostly useful for sampling snapshots.
    pub fn at_time(config: WaveConfig, elapsed: f32) -> Self {
        Self { config, elapsed }
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut WaveConfig {
        &mut self.config
    }

    /// Replace the wave parameters without touching the clock.
    pub fn set_config(&mut self, config: WaveConfig) {
        self.config = config;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Accumulate one tick of host delta time.
    pub fn advance(&mut self, delta_seconds: f32) {
        self.elapsed += delta_seconds;
    }

    /// Height of component `index` at `position`, or 0 for an unknown index.
    pub fn component_height(&self, index: usize, position: Vec3) -> f32 {
        self.config
            .component(index)
            .map(|wave| wave_height(wave, self.config.wind_speed, position, self.elapsed))
            .unwrap_or(0.0)
    }

    /// Sum of all components at `position`.
    #[inline]
    pub fn field_height(&self, position: Vec3) -> f32 {
        self.config
            .waves
            .iter()
            .map(|wave| wave_height(wave, self.config.wind_speed, position, self.elapsed))
            .sum()
    }

    /// Mesh-local height used to displace the rendered surface.
    #[inline]
    pub fn local_surface_height(&self, x: f32, z: f32) -> f32 {
        self.field_height(Vec3::new(x, 0.0, z))
    }

    /// World Y of the water line a floating body converges to.
    #[inline]
    pub fn target_height(&self, position: Vec3) -> f32 {
        self.field_height(position) + self.config.surface_bias - self.config.base_level.abs()
    }

    /// Slope of the dominant component only; the other components move
    /// the height but never the normal.
    pub fn slope(&self, position: Vec3) -> (f32, f32) {
        let wave = &self.config.waves[DOMINANT_WAVE];
        let wind = self.config.wind_speed;
        (
            partial_derivative_x(wave, wind, position, self.elapsed),
            partial_derivative_z(wave, wind, position, self.elapsed),
        )
    }

    pub fn normal_at(&self, position: Vec3) -> Vec3 {
        let (dx, dz) = self.slope(position);
        surface_normal(dx, dz)
    }

    /// Sample everything the buoyancy pass needs at once.
    pub fn sample(&self, position: Vec3) -> WaveSample {
        let height = self.field_height(position);
        let slope = self.slope(position);
        WaveSample {
            height,
            target_height: height + self.config.surface_bias - self.config.base_level.abs(),
            slope,
            normal: surface_normal(slope.0, slope.1),
        }
    }
}
