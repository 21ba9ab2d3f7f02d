//! Depth-proportional buoyancy for bodies floating on the wave field.
//!
//! This is not a displaced-volume integral. Each tick a body is pushed up
//! by `-gravity * depth * mass`, where depth is how far its reference point
//! sits under the target water line, and is tilted along the dominant
//! wave's slope in proportion to that same depth.

use bevy::math::Vec3;
use bevy::prelude::{Reflect, ReflectResource};
use bevy_ecs::prelude::Resource;
use bevy_log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::{BodyError, FloatingRegistry, RigidBodies};
use crate::constants::{FLOATING_LINEAR_DAMPING, GRAVITY};
use crate::water::WaveField;

/// Tuning for the buoyancy pass.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
pub struct BuoyancySettings {
    /// Same vector the solver integrates; buoyancy pushes against it
    pub gravity: Vec3,
    /// Damping written to every floating body each tick
    pub linear_damping: f32,
}

impl Default for BuoyancySettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            linear_damping: FLOATING_LINEAR_DAMPING,
        }
    }
}

/// How far `y` sits under `target_y`; zero when at or above it.
#[inline]
pub fn submersion_depth(target_y: f32, y: f32) -> f32 {
    (target_y - y).max(0.0)
}

#[inline]
pub fn buoyant_force(gravity: Vec3, depth: f32, mass: f32) -> Vec3 {
    -gravity * (depth * mass)
}

/// Outcome of one coupling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CouplingReport {
    /// Bodies that received every write
    pub coupled: usize,
    /// Coupled bodies with positive depth
    pub submerged: usize,
    /// Bodies dropped because their handle no longer resolved
    pub skipped: usize,
}

/// Pushes wave forces into the solver for every floating body.
///
/// Built per pass with the collaborators it works against.
pub struct BuoyancyCoupler<'a, P, R> {
    physics: &'a mut P,
    registry: &'a R,
    settings: &'a BuoyancySettings,
}

impl<'a, P, R> BuoyancyCoupler<'a, P, R>
where
    P: RigidBodies,
    R: FloatingRegistry<Handle = P::Handle>,
{
    pub fn new(physics: &'a mut P, registry: &'a R, settings: &'a BuoyancySettings) -> Self {
        Self {
            physics,
            registry,
            settings,
        }
    }

    /// Run one pass over the current floating set.
    ///
    /// Must run after the solver has written last step's positions and
    /// before the step that consumes the forces.
    pub fn tick(&mut self, field: &WaveField) -> CouplingReport {
        let bodies = self.registry.floating_bodies();
        let mut report = CouplingReport::default();

        for body in bodies {
            match self.couple(field, body) {
                Ok(depth) => {
                    report.coupled += 1;
                    if depth > 0.0 {
                        report.submerged += 1;
                    }
                }
                Err(err) => {
                    debug!("Skipping floating body: {err}");
                    report.skipped += 1;
                }
            }
        }

        trace!(
            "Buoyancy pass at t={:.3}: {} coupled, {} submerged, {} skipped",
            field.elapsed(),
            report.coupled,
            report.submerged,
            report.skipped
        );
        report
    }

    /// Apply every write to a single body. Returns its submersion depth.
    pub fn couple(&mut self, field: &WaveField, body: P::Handle) -> Result<f32, BodyError> {
        // Every read happens before the first write, so a failed read
        // leaves the body untouched
        let position = self.physics.position(body)?;
        let mass = self.physics.mass(body)?;
        let velocity = self.physics.linear_velocity(body)?;

        let sample = field.sample(position);
        let depth = submersion_depth(sample.target_height, position.y);

        self.physics.apply_force(
            body,
            buoyant_force(self.settings.gravity, depth, mass),
            position,
        )?;
        self.physics
            .set_linear_damping(body, self.settings.linear_damping)?;

        // Tilt toward the local slope; vanishes with depth
        let tilt = Vec3::new(sample.normal.x, 0.0, sample.normal.z) * depth;
        self.physics.set_angular_velocity(body, tilt)?;

        // Horizontal drift is dropped; vertical motion stays with the solver
        self.physics
            .set_linear_velocity(body, Vec3::new(0.0, velocity.y, 0.0))?;

        Ok(depth)
    }
}
