//! Procedural ocean with buoyant floating bodies.
//!
//! The wave field and the buoyancy coupler are plain Rust behind small
//! traits; `physics::rapier` plugs them into Bevy and Rapier.

use std::path::PathBuf;

pub mod constants;
pub mod daylight;
pub mod physics;
pub mod sets;
pub mod settings;
pub mod water;

pub use constants::*;
pub use physics::{BuoyancySettings, Floating, FloatingBodyBundle, OceanPhysicsPlugin};
pub use settings::{load_or_create_settings, OceanSettings};
pub use water::{WaveConfig, WaveField, WavePreset};

/// Where the settings file lives: the given path, or `SETTINGS_FILE` in
/// the working directory.
pub fn settings_path(path: Option<String>) -> PathBuf {
    path.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
}
