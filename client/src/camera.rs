use crate::constants::{CAMERA_SPEED, CAMERA_START, CAMERA_TURN_SPEED};
use crate::input::data::GameAction;
use crate::input::keyboard::is_action_pressed;
use crate::input::keyboard::KeyMap;
use bevy::prelude::*;
use shared::sets::OceanUpdateSet;

#[derive(Component)]
pub struct FlyCamera;

pub fn camera_plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera).add_systems(
        Update,
        fly_camera_system.in_set(OceanUpdateSet::Input),
    );
}

fn spawn_camera(mut commands: Commands) {
    let (x, y, z) = CAMERA_START;
    commands.spawn((
        Name::new("Camera"),
        FlyCamera,
        Camera3d::default(),
        Transform::from_xyz(x, y, z).looking_at(Vec3::new(0.0, -8.0, 0.0), Vec3::Y),
    ));
}

/// Camera-local movement direction for the pressed actions.
/// x is strafe, y is vertical, z is backward (Bevy's forward is -z).
pub fn movement_axis(pressed: impl Fn(GameAction) -> bool) -> Vec3 {
    const AXES: [(GameAction, Vec3); 6] = [
        (GameAction::MoveForward, Vec3::NEG_Z),
        (GameAction::MoveBackward, Vec3::Z),
        (GameAction::MoveLeft, Vec3::NEG_X),
        (GameAction::MoveRight, Vec3::X),
        (GameAction::MoveUp, Vec3::Y),
        (GameAction::MoveDown, Vec3::NEG_Y),
    ];

    AXES.iter()
        .filter(|(action, _)| pressed(*action))
        .map(|(_, axis)| *axis)
        .sum::<Vec3>()
        .normalize_or_zero()
}

/// Yaw and pitch deltas, in radians per second.
pub fn turn_axis(pressed: impl Fn(GameAction) -> bool) -> Vec2 {
    let mut turn = Vec2::ZERO;
    if pressed(GameAction::TurnLeft) {
        turn.x += 1.0;
    }
    if pressed(GameAction::TurnRight) {
        turn.x -= 1.0;
    }
    if pressed(GameAction::LookUp) {
        turn.y += 1.0;
    }
    if pressed(GameAction::LookDown) {
        turn.y -= 1.0;
    }
    turn * CAMERA_TURN_SPEED
}

pub fn fly_camera_system(
    mut camera: Query<&mut Transform, With<FlyCamera>>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    time: Res<Time>,
) {
    let Ok(mut transform) = camera.single_mut() else {
        debug!("Camera not found");
        return;
    };

    let pressed = |action| is_action_pressed(action, &keyboard_input, &key_map);
    let dt = time.delta_secs();

    let turn = turn_axis(pressed);
    transform.rotate_y(turn.x * dt);
    transform.rotate_local_x(turn.y * dt);

    let local = movement_axis(pressed);
    if local != Vec3::ZERO {
        let world = transform.rotation * Vec3::new(local.x, 0.0, local.z) + Vec3::Y * local.y;
        transform.translation += world * CAMERA_SPEED * dt;
    }
}
