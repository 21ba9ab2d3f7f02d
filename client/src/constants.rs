pub const BINDS_PATH: &str = "keybindings.ron";

pub const CAMERA_SPEED: f32 = 12.0;
pub const CAMERA_TURN_SPEED: f32 = 1.2;
pub const CAMERA_START: (f32, f32, f32) = (0.0, 4.0, 24.0);

pub const CRATE_HALF_EXTENT: f32 = 0.5;
pub const CRATE_MASS: f32 = 50.0;
pub const BALL_RADIUS: f32 = 0.6;
pub const BALL_MASS: f32 = 5.0;

/// Distance in front of the camera at which dropped crates appear
pub const DROP_DISTANCE: f32 = 6.0;
pub const DROP_JITTER: f32 = 0.5;
/// Spawned above the water line so bodies fall in
pub const SCATTER_HEIGHT: f32 = 3.0;
pub const MAX_INITIAL_FLOTSAM: u32 = 256;
