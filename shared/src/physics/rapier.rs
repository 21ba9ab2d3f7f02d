//! Rapier physics integration for the ocean.
//!
//! Floating bodies are ordinary dynamic Rapier bodies carrying the
//! [`Floating`] marker. Buoyancy runs in `Update`, after Rapier's
//! writeback from the previous step and before the `PostUpdate` step that
//! consumes the forces.

use bevy::prelude::*;
use bevy_log::info;
use bevy_rapier3d::prelude::*;

use super::buoyancy::{BuoyancyCoupler, BuoyancySettings};
use super::{BodyError, FloatingRegistry, RigidBodies};
use crate::sets::OceanUpdateSet;
use crate::water::{WaveComponent, WaveConfig, WaveField};

/// Component marking an entity as taking part in the buoyancy pass.
#[derive(Component, Default, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct Floating;

/// Bundle for creating a floating dynamic body.
#[derive(Bundle)]
pub struct FloatingBodyBundle {
    pub body: RigidBody,
    pub collider: Collider,
    pub mass: ColliderMassProperties,
    pub velocity: Velocity,
    pub damping: Damping,
    pub external_force: ExternalForce,
    pub read_mass: ReadMassProperties,
    pub floating: Floating,
}

impl FloatingBodyBundle {
    /// Create a floating body with an explicit collider and mass.
    pub fn new(collider: Collider, mass: f32) -> Self {
        Self {
            body: RigidBody::Dynamic,
            collider,
            mass: ColliderMassProperties::Mass(mass),
            velocity: Velocity::zero(),
            damping: Damping::default(),
            // Overwritten every tick by the buoyancy pass
            external_force: ExternalForce::default(),
            read_mass: ReadMassProperties::default(),
            floating: Floating,
        }
    }

    /// Box-shaped floating body.
    ///
    /// # Arguments
    /// * `half_extents` - Half size along each axis
    /// * `mass` - Body mass
    pub fn cuboid(half_extents: Vec3, mass: f32) -> Self {
        Self::new(
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            mass,
        )
    }

    pub fn ball(radius: f32, mass: f32) -> Self {
        Self::new(Collider::ball(radius), mass)
    }
}

/// Components the buoyancy pass reads and writes on each floating body.
pub type FloatingBodyData = (
    &'static GlobalTransform,
    &'static ReadMassProperties,
    &'static mut Velocity,
    &'static mut Damping,
    &'static mut ExternalForce,
);

/// [`RigidBodies`] over a Bevy query. An entity that was despawned or is
/// missing one of the components resolves to [`BodyError::Missing`].
pub struct RapierBodies<'q, 'w, 's> {
    query: &'q mut Query<'w, 's, FloatingBodyData, With<Floating>>,
}

impl<'q, 'w, 's> RapierBodies<'q, 'w, 's> {
    pub fn new(query: &'q mut Query<'w, 's, FloatingBodyData, With<Floating>>) -> Self {
        Self { query }
    }
}

impl RigidBodies for RapierBodies<'_, '_, '_> {
    type Handle = Entity;

    fn position(&self, body: Entity) -> Result<Vec3, BodyError> {
        let (transform, ..) = self.query.get(body).map_err(|_| BodyError::missing(body))?;
        Ok(transform.translation())
    }

    fn mass(&self, body: Entity) -> Result<f32, BodyError> {
        let (_, mass_properties, ..) = self.query.get(body).map_err(|_| BodyError::missing(body))?;
        Ok(mass_properties.get().mass)
    }

    fn linear_velocity(&self, body: Entity) -> Result<Vec3, BodyError> {
        let (_, _, velocity, ..) = self.query.get(body).map_err(|_| BodyError::missing(body))?;
        Ok(velocity.linvel)
    }

    fn set_linear_velocity(&mut self, body: Entity, linvel: Vec3) -> Result<(), BodyError> {
        let (_, _, mut velocity, ..) = self
            .query
            .get_mut(body)
            .map_err(|_| BodyError::missing(body))?;
        velocity.linvel = linvel;
        Ok(())
    }

    fn set_angular_velocity(&mut self, body: Entity, angvel: Vec3) -> Result<(), BodyError> {
        let (_, _, mut velocity, ..) = self
            .query
            .get_mut(body)
            .map_err(|_| BodyError::missing(body))?;
        velocity.angvel = angvel;
        Ok(())
    }

    fn set_linear_damping(&mut self, body: Entity, coefficient: f32) -> Result<(), BodyError> {
        let (_, _, _, mut damping, _) = self
            .query
            .get_mut(body)
            .map_err(|_| BodyError::missing(body))?;
        damping.linear_damping = coefficient;
        Ok(())
    }

    fn apply_force(&mut self, body: Entity, force: Vec3, at_point: Vec3) -> Result<(), BodyError> {
        let (transform, mass_properties, _, _, mut external_force) = self
            .query
            .get_mut(body)
            .map_err(|_| BodyError::missing(body))?;
        let center_of_mass = transform.transform_point(mass_properties.get().local_center_of_mass);
        *external_force = ExternalForce::at_point(force, at_point, center_of_mass);
        Ok(())
    }
}

impl FloatingRegistry for Query<'_, '_, Entity, With<Floating>> {
    type Handle = Entity;

    fn floating_bodies(&self) -> Vec<Entity> {
        self.iter().collect()
    }
}

/// Accumulate the engine's frame delta into the wave clock.
pub fn advance_wave_field(time: Res<Time>, mut field: ResMut<WaveField>) {
    field.advance(time.delta_secs());
}

/// Push wave forces into every floating body.
pub fn apply_buoyancy(
    field: Res<WaveField>,
    settings: Res<BuoyancySettings>,
    floating: Query<Entity, With<Floating>>,
    mut bodies: Query<FloatingBodyData, With<Floating>>,
) {
    let mut physics = RapierBodies::new(&mut bodies);
    BuoyancyCoupler::new(&mut physics, &floating, &settings).tick(&field);
}

/// Clear the buoyancy writes from a body that stops floating. Rapier keeps
/// `ExternalForce` across steps, so the last buoyant force would stay.
pub fn release_floating_body(
    trigger: Trigger<OnRemove, Floating>,
    mut bodies: Query<(&mut ExternalForce, Option<&mut Damping>)>,
) {
    let Ok((mut external_force, damping)) = bodies.get_mut(trigger.target()) else {
        return;
    };
    *external_force = ExternalForce::default();
    if let Some(mut damping) = damping {
        *damping = Damping::default();
    }
}

/// Keep Rapier's gravity equal to the vector buoyancy opposes.
fn sync_rapier_gravity(
    settings: Res<BuoyancySettings>,
    mut query: Query<&mut RapierConfiguration>,
) {
    for mut config in query.iter_mut() {
        if config.gravity != settings.gravity {
            info!("Rapier gravity set to {}", settings.gravity);
            config.gravity = settings.gravity;
        }
    }
}

/// Plugin that sets up Rapier and the buoyancy pass.
pub struct OceanPhysicsPlugin {
    pub waves: WaveConfig,
    pub buoyancy: BuoyancySettings,
    /// Draw Rapier collider outlines
    pub debug_render: bool,
}

impl Default for OceanPhysicsPlugin {
    fn default() -> Self {
        Self {
            waves: WaveConfig::default(),
            buoyancy: BuoyancySettings::default(),
            debug_render: false,
        }
    }
}

impl Plugin for OceanPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            RapierPhysicsPlugin::<NoUserData>::default().with_default_system_setup(true),
        );

        app.insert_resource(WaveField::new(self.waves.clone()))
            .insert_resource(self.buoyancy)
            .register_type::<WaveField>()
            .register_type::<WaveConfig>()
            .register_type::<WaveComponent>()
            .register_type::<BuoyancySettings>()
            .register_type::<Floating>()
            .configure_sets(
                Update,
                (
                    OceanUpdateSet::Input,
                    OceanUpdateSet::Simulation,
                    OceanUpdateSet::Rendering,
                    OceanUpdateSet::Ui,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (sync_rapier_gravity, advance_wave_field, apply_buoyancy)
                    .chain()
                    .in_set(OceanUpdateSet::Simulation),
            )
            .add_observer(release_floating_body);

        if self.debug_render {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FLOATING_LINEAR_DAMPING;
    use crate::water::WavePreset;
    use crate::physics::buoyancy::submersion_depth;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::time::TimeUpdateStrategy;
    use bevy::transform::TransformPlugin;
    use std::time::Duration;

    fn ocean_world() -> World {
        let mut world = World::new();
        world.insert_resource(WaveField::new(WavePreset::Calm.to_config()));
        world.insert_resource(BuoyancySettings::default());
        world
    }

    fn spawn_body(world: &mut World, position: Vec3, linvel: Vec3) -> Entity {
        world
            .spawn((
                Floating,
                GlobalTransform::from_translation(position),
                ReadMassProperties::default(),
                Velocity {
                    linvel,
                    angvel: Vec3::ONE,
                },
                Damping::default(),
                ExternalForce::default(),
            ))
            .id()
    }

    #[test]
    fn test_floating_body_bundle_creation() {
        let bundle = FloatingBodyBundle::cuboid(Vec3::splat(0.5), 50.0);
        assert!(matches!(bundle.body, RigidBody::Dynamic));
        assert!(matches!(bundle.mass, ColliderMassProperties::Mass(m) if m == 50.0));

        let ball = FloatingBodyBundle::ball(1.0, 5.0);
        assert!(matches!(ball.mass, ColliderMassProperties::Mass(m) if m == 5.0));
    }

    #[test]
    fn test_apply_buoyancy_writes_floating_bodies() {
        let mut world = ocean_world();
        let body = spawn_body(&mut world, Vec3::new(0.0, -20.0, 0.0), Vec3::new(3.0, -2.0, 1.0));

        world.run_system_once(apply_buoyancy).expect("system runs");

        let velocity = world.get::<Velocity>(body).expect("velocity");
        assert_eq!(velocity.linvel, Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(velocity.angvel.y, 0.0);
        let damping = world.get::<Damping>(body).expect("damping");
        assert_eq!(damping.linear_damping, FLOATING_LINEAR_DAMPING);
    }

    #[test]
    fn test_apply_buoyancy_ignores_untagged_bodies() {
        let mut world = ocean_world();
        let body = world
            .spawn((
                GlobalTransform::from_translation(Vec3::new(0.0, -20.0, 0.0)),
                ReadMassProperties::default(),
                Velocity::linear(Vec3::new(3.0, 0.0, 0.0)),
                Damping::default(),
                ExternalForce::default(),
            ))
            .id();

        world.run_system_once(apply_buoyancy).expect("system runs");

        let velocity = world.get::<Velocity>(body).expect("velocity");
        assert_eq!(velocity.linvel, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_incomplete_body_is_skipped() {
        let mut world = ocean_world();
        let incomplete = world
            .spawn((Floating, GlobalTransform::from_translation(Vec3::NEG_Y * 20.0)))
            .id();
        let body = spawn_body(&mut world, Vec3::new(1.0, -20.0, 1.0), Vec3::X);

        world.run_system_once(apply_buoyancy).expect("system runs");

        assert!(world.get::<Velocity>(incomplete).is_none());
        assert_eq!(world.get::<Velocity>(body).expect("velocity").linvel, Vec3::ZERO);
    }

    #[test]
    fn test_rapier_bodies_report_missing_entity() {
        let mut world = ocean_world();
        let body = spawn_body(&mut world, Vec3::ZERO, Vec3::ZERO);
        world.despawn(body);

        let result = world
            .run_system_once(move |mut query: Query<FloatingBodyData, With<Floating>>| {
                let bodies = RapierBodies::new(&mut query);
                bodies.position(body)
            })
            .expect("system runs");

        assert_eq!(result, Err(BodyError::missing(body)));
    }

    #[test]
    fn test_rapier_bodies_apply_force() {
        let mut world = ocean_world();
        let body = spawn_body(&mut world, Vec3::new(2.0, -12.0, 0.0), Vec3::ZERO);

        world
            .run_system_once(move |mut query: Query<FloatingBodyData, With<Floating>>| {
                let mut bodies = RapierBodies::new(&mut query);
                bodies.apply_force(body, Vec3::Y * 100.0, Vec3::new(2.0, -12.0, 0.0))
            })
            .expect("system runs")
            .expect("body exists");

        let external_force = world.get::<ExternalForce>(body).expect("force");
        assert_eq!(external_force.force, Vec3::Y * 100.0);
        // Applied through the centre of mass, so no torque
        assert!(external_force.torque.length() < 1e-5);
    }

    #[test]
    fn test_registry_lists_only_floating_entities() {
        let mut world = ocean_world();
        spawn_body(&mut world, Vec3::ZERO, Vec3::ZERO);
        spawn_body(&mut world, Vec3::ONE, Vec3::ZERO);
        world.spawn(GlobalTransform::default());

        let count = world
            .run_system_once(|floating: Query<Entity, With<Floating>>| {
                floating.floating_bodies().len()
            })
            .expect("system runs");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_advance_wave_field_uses_frame_delta() {
        let mut world = ocean_world();
        let mut time = Time::<()>::default();
        time.advance_by(std::time::Duration::from_millis(250));
        world.insert_resource(time);

        world.run_system_once(advance_wave_field).expect("system runs");
        world.run_system_once(advance_wave_field).expect("system runs");

        let field = world.resource::<WaveField>();
        assert!((field.elapsed() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_untagged_body_loses_its_force() {
        let mut world = ocean_world();
        world.add_observer(release_floating_body);
        let body = spawn_body(&mut world, Vec3::new(0.0, -20.0, 0.0), Vec3::ZERO);

        world
            .run_system_once(move |mut query: Query<FloatingBodyData, With<Floating>>| {
                let mut bodies = RapierBodies::new(&mut query);
                bodies.apply_force(body, Vec3::Y * 2500.0, Vec3::new(0.0, -20.0, 0.0))
            })
            .expect("system runs")
            .expect("body exists");
        world.run_system_once(apply_buoyancy).expect("system runs");
        assert_eq!(
            world.get::<Damping>(body).expect("damping").linear_damping,
            FLOATING_LINEAR_DAMPING
        );

        world.entity_mut(body).remove::<Floating>();
        world.run_system_once(apply_buoyancy).expect("system runs");

        let external_force = world.get::<ExternalForce>(body).expect("force");
        assert_eq!(external_force.force, Vec3::ZERO);
        assert_eq!(external_force.torque, Vec3::ZERO);
        assert_eq!(world.get::<Damping>(body).expect("damping").linear_damping, 0.0);
    }

    #[derive(Resource, Default)]
    struct SampledAt(Option<Vec3>);

    fn record_sample_position(
        bodies: Query<&GlobalTransform, With<Floating>>,
        mut sampled: ResMut<SampledAt>,
    ) {
        sampled.0 = bodies.iter().next().map(|transform| transform.translation());
    }

    #[test]
    fn test_rapier_step_drives_buoyant_force() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, TransformPlugin, OceanPhysicsPlugin::default()))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
                1.0 / 60.0,
            )))
            .init_resource::<SampledAt>()
            .add_systems(Update, record_sample_position.in_set(OceanUpdateSet::Rendering));

        let body = app
            .world_mut()
            .spawn((
                FloatingBodyBundle::cuboid(Vec3::splat(0.5), 50.0),
                Transform::from_xyz(0.0, -20.0, 0.0),
            ))
            .id();

        app.finish();
        for _ in 0..3 {
            app.update();
        }

        let mass = app
            .world()
            .get::<ReadMassProperties>(body)
            .expect("mass properties")
            .get()
            .mass;
        assert!((mass - 50.0).abs() < 1e-3, "mass was {mass}");

        let position = app.world().resource::<SampledAt>().0.expect("body sampled");
        let field = app.world().resource::<WaveField>();
        let depth = submersion_depth(field.target_height(position), position.y);
        assert!(depth > 0.0);

        let external_force = app.world().get::<ExternalForce>(body).expect("force");
        let expected = 9.81 * depth * 50.0;
        assert!(
            (external_force.force.y - expected).abs() < expected * 1e-3,
            "force {} expected {}",
            external_force.force.y,
            expected
        );
        assert_eq!(external_force.force.x, 0.0);
        assert_eq!(external_force.force.z, 0.0);

        app.world_mut().entity_mut(body).remove::<Floating>();
        app.update();

        let external_force = app.world().get::<ExternalForce>(body).expect("force");
        assert_eq!(external_force.force, Vec3::ZERO);
    }
}
