//! Detection result structures.
//!
//! These structures hold the results of physics ray queries used for ground
//! detection and wall probing.

use bevy::prelude::*;

/// Information about a single ray hit.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct SensorCast {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// Normal of the surface at the hit point.
    pub normal: Vec3,
    /// World position of the hit point.
    pub point: Vec3,
    /// Entity that was hit (if any).
    pub entity: Option<Entity>,
    /// Whether the body that was hit is driven by the physics simulation.
    pub simulating_physics: bool,
}

impl SensorCast {
    /// Create a hit on a surface that is not simulating physics.
    pub fn new(distance: f32, normal: Vec3, point: Vec3, entity: Option<Entity>) -> Self {
        Self {
            distance,
            normal,
            point,
            entity,
            simulating_physics: false,
        }
    }

    /// Builder: mark the hit body as physically simulated.
    pub fn simulating(mut self, simulating: bool) -> Self {
        self.simulating_physics = simulating;
        self
    }

    /// Whether a character can push off this surface.
    #[inline]
    pub fn is_wall_jumpable(&self) -> bool {
        !self.simulating_physics
    }
}
