use crate::camera::FlyCamera;
use crate::constants::{
    BALL_MASS, BALL_RADIUS, CRATE_HALF_EXTENT, CRATE_MASS, DROP_DISTANCE, DROP_JITTER,
    SCATTER_HEIGHT,
};
use crate::input::data::GameAction;
use crate::input::keyboard::{is_action_just_pressed, KeyMap};
use bevy::prelude::*;
use rand::Rng;
use shared::sets::OceanUpdateSet;
use shared::{FloatingBodyBundle, WaveField};
use std::collections::VecDeque;
use std::f32::consts::PI;

/// How many bodies to scatter on startup.
#[derive(Resource, Debug, Clone, Copy)]
pub struct InitialFlotsam(pub u32);

/// Spawned floating bodies, oldest first.
#[derive(Resource, Debug, Default)]
pub struct Flotsam {
    pub spawned: VecDeque<Entity>,
}

#[derive(Resource)]
struct FlotsamAssets {
    crate_mesh: Handle<Mesh>,
    crate_material: Handle<StandardMaterial>,
    ball_mesh: Handle<Mesh>,
    ball_material: Handle<StandardMaterial>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlotsamKind {
    Crate,
    Ball,
}

impl FlotsamKind {
    /// Every third scattered body is a ball.
    pub fn for_index(index: u32) -> Self {
        if index % 3 == 2 {
            FlotsamKind::Ball
        } else {
            FlotsamKind::Crate
        }
    }
}

pub fn flotsam_plugin(app: &mut App) {
    app.init_resource::<Flotsam>()
        .add_systems(Startup, (load_flotsam_assets, scatter_initial_flotsam).chain())
        .add_systems(
            Update,
            (drop_crate_system, remove_oldest_system).in_set(OceanUpdateSet::Input),
        );
}

fn load_flotsam_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(FlotsamAssets {
        crate_mesh: meshes.add(Cuboid::from_length(CRATE_HALF_EXTENT * 2.0)),
        crate_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.55, 0.36, 0.2),
            perceptual_roughness: 0.9,
            ..default()
        }),
        ball_mesh: meshes.add(Sphere::new(BALL_RADIUS)),
        ball_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.25, 0.2),
            perceptual_roughness: 0.5,
            ..default()
        }),
    });
}

/// Spread bodies on a golden-angle spiral so none start overlapping.
pub fn scatter_position(index: u32, base_level: f32) -> Vec3 {
    let golden_angle = PI * (3.0 - 5.0f32.sqrt());
    let angle = index as f32 * golden_angle;
    let radius = 3.0 * (index as f32 + 1.0).sqrt();
    Vec3::new(
        radius * angle.cos(),
        base_level + SCATTER_HEIGHT,
        radius * angle.sin(),
    )
}

fn spawn_body(
    commands: &mut Commands,
    assets: &FlotsamAssets,
    kind: FlotsamKind,
    position: Vec3,
) -> Entity {
    let transform = Transform::from_translation(position);
    match kind {
        FlotsamKind::Crate => commands
            .spawn((
                Name::new("Crate"),
                FloatingBodyBundle::cuboid(Vec3::splat(CRATE_HALF_EXTENT), CRATE_MASS),
                Mesh3d(assets.crate_mesh.clone()),
                MeshMaterial3d(assets.crate_material.clone()),
                transform,
            ))
            .id(),
        FlotsamKind::Ball => commands
            .spawn((
                Name::new("Ball"),
                FloatingBodyBundle::ball(BALL_RADIUS, BALL_MASS),
                Mesh3d(assets.ball_mesh.clone()),
                MeshMaterial3d(assets.ball_material.clone()),
                transform,
            ))
            .id(),
    }
}

fn scatter_initial_flotsam(
    mut commands: Commands,
    assets: Res<FlotsamAssets>,
    initial: Res<InitialFlotsam>,
    field: Res<WaveField>,
    mut flotsam: ResMut<Flotsam>,
) {
    let base_level = field.config().base_level;
    for index in 0..initial.0 {
        let entity = spawn_body(
            &mut commands,
            &assets,
            FlotsamKind::for_index(index),
            scatter_position(index, base_level),
        );
        flotsam.spawned.push_back(entity);
    }
    info!("Scattered {} floating bodies", initial.0);
}

fn drop_crate_system(
    mut commands: Commands,
    assets: Option<Res<FlotsamAssets>>,
    camera: Query<&Transform, With<FlyCamera>>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    mut flotsam: ResMut<Flotsam>,
) {
    if !is_action_just_pressed(GameAction::DropCrate, &keyboard_input, &key_map) {
        return;
    }
    let Some(assets) = assets else {
        return;
    };
    let Ok(camera) = camera.single() else {
        debug!("Camera not found");
        return;
    };

    let mut rng = rand::thread_rng();
    let jitter = Vec3::new(
        rng.gen_range(-DROP_JITTER..=DROP_JITTER),
        0.0,
        rng.gen_range(-DROP_JITTER..=DROP_JITTER),
    );
    let position = camera.translation + camera.forward() * DROP_DISTANCE + jitter;

    let entity = spawn_body(&mut commands, &assets, FlotsamKind::Crate, position);
    flotsam.spawned.push_back(entity);
    debug!("Dropped crate {:?} at {}", entity, position);
}

fn remove_oldest_system(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    mut flotsam: ResMut<Flotsam>,
) {
    if !is_action_just_pressed(GameAction::RemoveOldest, &keyboard_input, &key_map) {
        return;
    }

    let Some(entity) = flotsam.spawned.pop_front() else {
        debug!("No floating bodies left to remove");
        return;
    };

    match commands.get_entity(entity) {
        Ok(mut entity_commands) => {
            entity_commands.despawn();
            debug!("Removed floating body {:?}", entity);
        }
        Err(e) => warn!("Floating body {:?} already gone: {}", entity, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scatter_positions_do_not_overlap() {
        let positions: Vec<Vec3> = (0..32).map(|i| scatter_position(i, -10.0)).collect();
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert!(a.distance(*b) > CRATE_HALF_EXTENT * 2.0);
            }
        }
    }

    #[test]
    fn test_scatter_starts_above_the_water() {
        let position = scatter_position(5, -10.0);
        assert_eq!(position.y, -10.0 + SCATTER_HEIGHT);
    }

    #[test]
    fn test_every_third_body_is_a_ball() {
        let kinds: Vec<FlotsamKind> = (0..6).map(FlotsamKind::for_index).collect();
        assert_eq!(
            kinds,
            vec![
                FlotsamKind::Crate,
                FlotsamKind::Crate,
                FlotsamKind::Ball,
                FlotsamKind::Crate,
                FlotsamKind::Crate,
                FlotsamKind::Ball,
            ]
        );
    }
}
