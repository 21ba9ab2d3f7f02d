//! On-disk ocean settings, stored as RON next to the game.

use bevy_log::{error, info};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::constants::{DAY_LENGTH_SECS, OCEAN_SIZE, OCEAN_SUBDIVISIONS};
use crate::physics::BuoyancySettings;
use crate::water::WaveConfig;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Ron(#[from] ron::Error),
}

/// Look of the rendered ocean surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSettings {
    /// Side length of the square surface mesh
    pub size: f32,
    /// Grid subdivisions per side; the mesh is displaced on the CPU every frame
    pub subdivisions: u32,
    pub base_color: [f32; 3],
    pub ambient_color: [f32; 3],
    pub specular_strength: f32,
    pub shininess: f32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            size: OCEAN_SIZE,
            subdivisions: OCEAN_SUBDIVISIONS,
            base_color: [0.0, 0.506, 0.62],
            ambient_color: [0.212, 0.314, 0.322],
            specular_strength: 0.14,
            shininess: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OceanSettings {
    #[serde(default)]
    pub waves: WaveConfig,
    #[serde(default)]
    pub buoyancy: BuoyancySettings,
    #[serde(default)]
    pub surface: SurfaceSettings,
    #[serde(default = "default_day_length")]
    pub day_length_secs: f32,
}

fn default_day_length() -> f32 {
    DAY_LENGTH_SECS
}

impl Default for OceanSettings {
    fn default() -> Self {
        Self {
            waves: WaveConfig::default(),
            buoyancy: BuoyancySettings::default(),
            surface: SurfaceSettings::default(),
            day_length_secs: DAY_LENGTH_SECS,
        }
    }
}

pub fn load_settings(path: &Path) -> Result<OceanSettings, SettingsError> {
    let contents = fs::read_to_string(path)?;
    Ok(ron::de::from_str(&contents)?)
}

pub fn save_settings(settings: &OceanSettings, path: &Path) -> Result<(), SettingsError> {
    let pretty_config = PrettyConfig::new()
        .with_depth_limit(4)
        .with_separate_tuple_members(true);
    let serialized = ron::ser::to_string_pretty(settings, pretty_config)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serialized)?;
    Ok(())
}

/// Load the settings at `path`, writing the defaults there when the file
/// does not exist yet. An unreadable file falls back to the defaults.
pub fn load_or_create_settings(path: &Path) -> OceanSettings {
    if !path.exists() {
        let settings = OceanSettings::default();
        match save_settings(&settings, path) {
            Ok(()) => info!("Wrote default ocean settings to {}", path.display()),
            Err(e) => error!(
                "Failed to create default ocean settings at {}: {}",
                path.display(),
                e
            ),
        }
        return settings;
    }

    match load_settings(path) {
        Ok(settings) => {
            info!("Loaded ocean settings from {}", path.display());
            settings
        }
        Err(e) => {
            error!(
                "Failed to load ocean settings from {}: {}. Using defaults.",
                path.display(),
                e
            );
            OceanSettings::default()
        }
    }
}
