//! Day/night cycle: sun position and light strength over the day.
//!
//! The sky dome is driven by an inclination and an azimuth that both
//! swing by ±0.55 over one day; the sun position follows the usual
//! dome mapping from those two angles.

use bevy::math::Vec3;
use std::f32::consts::{PI, TAU};

const SWING: f32 = 0.55;

/// Lights the cycle drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// The sun
    Directional,
    /// Sky fill light
    Hemispheric,
}

impl LightKind {
    /// Relative intensity at `phase`, peaking at midnight and noon alike.
    pub fn intensity(self, phase: f32) -> f32 {
        let strength = (phase * TAU).cos().abs();
        match self {
            LightKind::Directional => strength * 0.3,
            LightKind::Hemispheric => strength * 0.5,
        }
    }
}

/// Position in the day, in `[0, 1)`.
pub fn day_phase(elapsed: f32, day_length: f32) -> f32 {
    if day_length <= 0.0 {
        return 0.0;
    }
    (elapsed % day_length) / day_length
}

/// Sun position on the unit sky dome.
pub fn sun_position(phase: f32) -> Vec3 {
    let inclination = (phase * TAU).sin() * SWING;
    let azimuth = (phase * TAU).cos() * SWING;

    let theta = PI * (inclination - 0.5);
    let phi = TAU * (azimuth - 0.5);
    Vec3::new(phi.cos(), phi.sin() * theta.sin(), phi.sin() * theta.cos())
}

/// Direction the sunlight travels, from the sun toward the scene.
pub fn sun_direction(phase: f32) -> Vec3 {
    -sun_position(phase).normalize_or(Vec3::Y)
}
