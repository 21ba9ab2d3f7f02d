//! Coupling between the wave field and the rigid-body solver.
//!
//! The coupler only talks to the solver through [`RigidBodies`] and learns
//! which bodies float through [`FloatingRegistry`]. `rapier` implements
//! both over Bevy queries; tests implement them over plain maps.

pub mod buoyancy;
pub mod rapier;

use bevy::math::Vec3;
use std::fmt::Debug;
use thiserror::Error;

pub use buoyancy::{buoyant_force, submersion_depth, BuoyancyCoupler, BuoyancySettings, CouplingReport};
pub use rapier::{Floating, FloatingBodyBundle, OceanPhysicsPlugin, RapierBodies};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BodyError {
    /// The handle came from a tag query but no longer resolves to a live body.
    #[error("floating body {handle} no longer exists")]
    Missing { handle: String },
}

impl BodyError {
    pub fn missing(handle: impl Debug) -> Self {
        Self::Missing {
            handle: format!("{handle:?}"),
        }
    }
}

/// Per-body access to the rigid-body solver.
pub trait RigidBodies {
    type Handle: Copy + Debug;

    fn position(&self, body: Self::Handle) -> Result<Vec3, BodyError>;
    fn mass(&self, body: Self::Handle) -> Result<f32, BodyError>;
    fn linear_velocity(&self, body: Self::Handle) -> Result<Vec3, BodyError>;
    fn set_linear_velocity(&mut self, body: Self::Handle, velocity: Vec3) -> Result<(), BodyError>;
    fn set_angular_velocity(&mut self, body: Self::Handle, velocity: Vec3)
        -> Result<(), BodyError>;
    fn set_linear_damping(&mut self, body: Self::Handle, coefficient: f32) -> Result<(), BodyError>;
    /// Force for the next solver step, applied at a world-space point.
    fn apply_force(&mut self, body: Self::Handle, force: Vec3, at_point: Vec3)
        -> Result<(), BodyError>;
}

/// Bodies currently tagged as floating.
///
/// Returns a fresh snapshot every call; handles may come and go between ticks.
pub trait FloatingRegistry {
    type Handle: Copy + Debug;

    fn floating_bodies(&self) -> Vec<Self::Handle>;
}
