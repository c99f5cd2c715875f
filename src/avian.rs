//! Avian3D physics backend implementation.
//!
//! This module provides the physics backend for Avian3D (`avian3d`).
//! Enable with the `avian3d` feature.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::config::{CharacterController, ControllerConfig};
use crate::detection::SensorCast;

/// Avian3D physics backend for the character controller.
///
/// Velocity lives in [`LinearVelocity`]. Ray casts for wall probing read the
/// [`SpatialQueryPipeline`], and ground detection runs as a dedicated Avian
/// system.
pub struct Avian3dBackend;

impl CharacterPhysicsBackend for Avian3dBackend {
    fn plugin() -> impl Plugin {
        Avian3dBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<LinearVelocity>(entity)
            .map(|v| v.0)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3) {
        if let Some(mut vel) = world.get_mut::<LinearVelocity>(entity) {
            vel.0 = velocity;
        }
    }

    fn get_position(world: &World, entity: Entity) -> Vec3 {
        // Try Avian's Position component first, then fall back to Transform
        world
            .get::<Position>(entity)
            .map(|p| p.0)
            .or_else(|| world.get::<Transform>(entity).map(|t| t.translation))
            .or_else(|| world.get::<GlobalTransform>(entity).map(|t| t.translation()))
            .unwrap_or(Vec3::ZERO)
    }

    fn get_rotation(world: &World, entity: Entity) -> Quat {
        world
            .get::<Rotation>(entity)
            .map(|r| r.0)
            .or_else(|| world.get::<Transform>(entity).map(|t| t.rotation))
            .or_else(|| {
                world
                    .get::<GlobalTransform>(entity)
                    .map(|t| t.to_scale_rotation_translation().1)
            })
            .unwrap_or(Quat::IDENTITY)
    }

    fn set_rotation(world: &mut World, entity: Entity, rotation: Quat) {
        if let Some(mut r) = world.get_mut::<Rotation>(entity) {
            r.0 = rotation;
        }
        if let Some(mut transform) = world.get_mut::<Transform>(entity) {
            transform.rotation = rotation;
        }
    }

    fn cast_ray(
        world: &mut World,
        entity: Entity,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
    ) -> Option<SensorCast> {
        let filter = character_filter(entity, world.get::<CollisionLayers>(entity));
        let hit = world
            .get_resource::<SpatialQueryPipeline>()?
            .cast_ray(origin, direction, max_distance, true, &filter)?;

        let point = origin + direction * hit.distance;
        Some(
            SensorCast::new(hit.distance, hit.normal, point, Some(hit.entity))
                .simulating(is_simulating_physics(world, hit.entity)),
        )
    }

    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.delta_secs())
            .filter(|&d| d > 0.0)
            .unwrap_or(1.0 / 60.0)
    }

    fn capsule_body(radius: f32, half_height: f32) -> impl Bundle {
        let length = (2.0 * (half_height - radius)).max(0.0);
        (
            RigidBody::Dynamic,
            Collider::capsule(radius, length),
            LockedAxes::ROTATION_LOCKED,
        )
    }
}

/// Query filter for casts made on behalf of a character.
///
/// Excludes the character itself. With collision layers, only layers the
/// character collides with are hit.
pub fn character_filter(entity: Entity, layers: Option<&CollisionLayers>) -> SpatialQueryFilter {
    let filter = match layers {
        Some(layers) => SpatialQueryFilter::from_mask(layers.filters),
        None => SpatialQueryFilter::default(),
    };
    filter.with_excluded_entities([entity])
}

/// Whether the collider `entity` belongs to a body driven by the simulation.
///
/// Colliders without a rigid body count as static.
pub fn is_simulating_physics(world: &World, entity: Entity) -> bool {
    let body = world.get::<ColliderOf>(entity).map_or(entity, |c| c.body);
    world.get::<RigidBody>(body).is_some_and(|rb| rb.is_dynamic())
}

/// Plugin that sets up Avian3D-specific systems for the character controller.
pub struct Avian3dBackendPlugin;

impl Plugin for Avian3dBackendPlugin {
    fn build(&self, app: &mut App) {
        use crate::CharacterControllerSet;

        // A character is always a dynamic body with upright rotation; the
        // controller turns it explicitly.
        app.register_required_components_with::<CharacterController, RigidBody>(|| {
            RigidBody::Dynamic
        });
        app.register_required_components::<CharacterController, LinearVelocity>();
        app.register_required_components_with::<CharacterController, LockedAxes>(|| {
            LockedAxes::ROTATION_LOCKED
        });

        app.add_systems(
            FixedUpdate,
            avian_ground_detection.in_set(CharacterControllerSet::Sensors),
        );
    }
}

/// Get the distance from collider center to bottom for a given collider.
/// For capsules, this is half the segment length plus the radius.
pub fn get_collider_bottom_offset(collider: &Collider) -> f32 {
    let shape = collider.shape_scaled();
    if let Some(capsule) = shape.as_capsule() {
        let segment = capsule.segment;
        let half_height = (segment.a.y - segment.b.y).abs() / 2.0;
        half_height + capsule.radius
    } else if let Some(ball) = shape.as_ball() {
        ball.radius
    } else if let Some(cuboid) = shape.as_cuboid() {
        cuboid.half_extents.y
    } else {
        // Unknown shape: measure from the center
        0.0
    }
}

/// Avian-specific ground detection using a downward ray.
///
/// Ray length: collider_bottom_offset + ground_check_distance.
///
/// Grounded requires a hit on a walkable slope while not rising faster than
/// `max_grounded_rise_speed`.
fn avian_ground_detection(
    spatial_query: SpatialQuery,
    mut q_controllers: Query<(
        Entity,
        &Position,
        &ControllerConfig,
        &mut CharacterController,
        Option<&LinearVelocity>,
        Option<&Collider>,
        Option<&CollisionLayers>,
    )>,
) {
    for (entity, position, config, mut controller, velocity, collider, layers) in &mut q_controllers {
        let origin = position.0;

        controller.collider_bottom_offset = collider.map(get_collider_bottom_offset).unwrap_or(0.0);
        controller.reset_detection_state();

        let cast_length = controller.collider_bottom_offset + config.sensors.ground_check_distance;
        let filter = character_filter(entity, layers);

        let Some(hit) = spatial_query.cast_ray(origin, Dir3::NEG_Y, cast_length, true, &filter)
        else {
            continue;
        };

        let ground = SensorCast::new(
            hit.distance,
            hit.normal,
            origin + Vec3::NEG_Y * hit.distance,
            Some(hit.entity),
        );
        controller.ground = Some(ground);

        let walkable = hit.normal.angle_between(Vec3::Y) <= config.walking.max_slope_angle;
        let rising = velocity.is_some_and(|v| v.y > config.sensors.max_grounded_rise_speed);
        controller.is_grounded = walkable && !rising;
    }
}
