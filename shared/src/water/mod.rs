//! Procedural ocean surface.
//!
//! `WaveConfig` is the single source of truth for the wave parameters and
//! is read by:
//! - the buoyancy pass (`physics::buoyancy`), once per floating body per tick
//! - the client's surface mesh, once per vertex per frame
//!
//! `WaveField` wraps the config with the simulation clock. The clock only
//! advances by the delta time the host hands it, so evaluation stays
//! reproducible in tests.

pub mod config;
pub mod field;

pub use config::{WaveComponent, WaveConfig, WavePreset};
pub use field::{
    partial_derivative_x, partial_derivative_z, surface_normal, wave_height, WaveField, WaveSample,
};
