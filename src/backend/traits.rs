//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement
//! to work with the character controller. This allows easy swapping
//! between physics engines (Avian, Rapier, custom, etc.).

use bevy::prelude::*;

use crate::detection::SensorCast;

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the character
/// controller. The backend handles velocity manipulation, transforms and ray
/// queries. Backends also own ground detection: their plugin must write
/// [`CharacterController::is_grounded`](crate::config::CharacterController)
/// in [`CharacterControllerSet::Sensors`](crate::CharacterControllerSet::Sensors).
///
/// For an example implementation, see `Avian3dBackend` in the `avian` module.
pub trait CharacterPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Get the current velocity of an entity.
    fn get_velocity(world: &World, entity: Entity) -> Vec3;

    /// Set the velocity of an entity.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3);

    /// Get the current position of an entity.
    fn get_position(world: &World, entity: Entity) -> Vec3;

    /// Get the current rotation of an entity.
    fn get_rotation(world: &World, entity: Entity) -> Quat;

    /// Set the rotation of an entity.
    fn set_rotation(world: &mut World, entity: Entity, rotation: Quat);

    /// Cast a ray from `origin`, ignoring `entity` itself.
    ///
    /// The returned hit must report whether the body that was hit is simulated
    /// by physics.
    fn cast_ray(
        world: &mut World,
        entity: Entity,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
    ) -> Option<SensorCast>;

    /// Get the fixed timestep delta time.
    fn get_fixed_timestep(world: &World) -> f32;

    /// Physics components for a character with a capsule collider.
    ///
    /// `half_height` is measured from the center to the tip of the capsule.
    fn capsule_body(radius: f32, half_height: f32) -> impl Bundle;
}
