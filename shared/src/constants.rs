use bevy::prelude::*;

/// Gravity applied by the rigid-body solver and opposed by buoyancy.
pub const GRAVITY: Vec3 = Vec3 {
    x: 0.0,
    y: -9.81,
    z: 0.0,
};
/// World Y of the ocean mesh.
pub const OCEAN_BASE_Y: f32 = -10.0;
/// Constant added to the summed wave height before converting to world Y.
pub const SURFACE_BIAS: f32 = 0.5;
/// Uniform scale on the time term of every wave component.
pub const WIND_SPEED: f32 = 5.0;
/// Linear damping forced on every floating body each tick.
pub const FLOATING_LINEAR_DAMPING: f32 = 0.15;
/// Number of components summed into the height field.
pub const WAVE_COMPONENTS: usize = 3;
/// Index of the component whose slope drives the surface normal.
pub const DOMINANT_WAVE: usize = 0;
pub const OCEAN_SIZE: f32 = 300.0;
pub const OCEAN_SUBDIVISIONS: u32 = 200;
pub const DAY_LENGTH_SECS: f32 = 120.0;
pub const SETTINGS_FILE: &str = "ocean.ron";
