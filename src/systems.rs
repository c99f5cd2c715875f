//! Backend-agnostic controller systems: landing, jumping and walking.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

use crate::arbiter::{JumpAction, JumpArbiter, JumpState};
use crate::backend::CharacterPhysicsBackend;
use crate::config::{CharacterController, ControllerConfig, WalkingConfig};
use crate::cues::JumpCues;
use crate::host::WorldMovementHost;
use crate::intent::MovementIntent;

/// Written once per processed jump request.
#[derive(Message, Debug, Clone, Copy)]
pub struct JumpPerformed {
    /// The character that requested the jump.
    pub entity: Entity,
    /// What the request resolved to.
    pub action: JumpAction,
}

/// Written when a character touches down after being airborne.
#[derive(Message, Debug, Clone, Copy)]
pub struct CharacterLanded {
    pub entity: Entity,
}

/// Detect airborne to grounded transitions and run the landing callback.
pub fn update_landing(
    mut q: Query<(Entity, &mut CharacterController, Option<&mut JumpState>)>,
    mut landed: MessageWriter<CharacterLanded>,
) {
    for (entity, mut controller, state) in &mut q {
        if controller.just_landed() {
            if let Some(mut state) = state {
                JumpArbiter::on_landed(&mut state);
            }
            landed.write(CharacterLanded { entity });
            trace!("{entity} landed");
        }
        if controller.was_grounded != controller.is_grounded {
            controller.was_grounded = controller.is_grounded;
        }
    }
}

/// Consume pending jump requests and resolve each through the arbiter.
///
/// Exclusive so the arbiter can query physics inline through the backend.
pub fn process_jump_requests<B: CharacterPhysicsBackend>(world: &mut World) {
    let mut q = world.query::<(Entity, &mut MovementIntent)>();
    let requested: Vec<Entity> = q
        .iter_mut(world)
        .filter_map(|(entity, mut intent)| {
            // `has_jump_request` reads through `Deref`, so idle intents are not
            // flagged as changed.
            (intent.has_jump_request() && intent.take_jump_request()).then_some(entity)
        })
        .collect();

    for entity in requested {
        let (Some(config), Some(mut state)) = (
            world.get::<ControllerConfig>(entity).copied(),
            world.get::<JumpState>(entity).copied(),
        ) else {
            continue;
        };
        let cues = world.get::<JumpCues>(entity).cloned().unwrap_or_default();

        let action = {
            let mut host = WorldMovementHost::<B>::new(world, entity);
            JumpArbiter::new(&config, &cues).on_jump_requested(&mut state, &mut host)
        };

        if let Some(mut current) = world.get_mut::<JumpState>(entity) {
            *current = state;
        }
        world.write_message(JumpPerformed { entity, action });
    }
}

/// Apply walking acceleration, braking and rotation toward movement.
pub fn apply_walking<B: CharacterPhysicsBackend>(world: &mut World) {
    let dt = B::get_fixed_timestep(world);

    let mut q = world.query::<(Entity, &ControllerConfig, &CharacterController, &MovementIntent)>();
    let walkers: Vec<(Entity, WalkingConfig, bool, Vec3)> = q
        .iter(world)
        .map(|(entity, config, controller, intent)| {
            (
                entity,
                config.walking,
                controller.is_grounded,
                intent.world_direction(),
            )
        })
        .collect();

    for (entity, walking, grounded, input) in walkers {
        let velocity = B::get_velocity(world, entity);
        let horizontal = walk_velocity(&walking, velocity.with_y(0.0), input, grounded, dt);
        B::set_velocity(world, entity, horizontal.with_y(velocity.y));

        if walking.orient_rotation_to_movement && input.length_squared() > 1e-6 {
            let rotation = B::get_rotation(world, entity);
            let max_step = walking.rotation_rate.to_radians() * dt;
            B::set_rotation(world, entity, turn_toward(rotation, input, max_step));
        }
    }
}

/// New horizontal velocity after one step of walking.
///
/// Accelerates toward the input direction (scaled by air control while
/// falling), or brakes toward rest when there is no input.
pub fn walk_velocity(
    config: &WalkingConfig,
    horizontal: Vec3,
    input: Vec3,
    grounded: bool,
    dt: f32,
) -> Vec3 {
    let magnitude = input.length();
    if magnitude <= 1e-3 {
        let braking = if grounded {
            config.braking_deceleration_walking
        } else {
            config.braking_deceleration_falling
        };
        return approach(horizontal, Vec3::ZERO, braking * dt);
    }

    let speed = (config.max_walk_speed * magnitude).max(config.min_analog_walk_speed);
    let target = input / magnitude * speed;
    let acceleration = if grounded {
        config.acceleration
    } else {
        config.acceleration * config.air_control
    };
    approach(horizontal, target, acceleration * dt)
}

/// Yaw-only rotation turned from `current` toward facing `direction`,
/// by at most `max_step` radians.
pub fn turn_toward(current: Quat, direction: Vec3, max_step: f32) -> Quat {
    let (yaw, _, _) = current.to_euler(EulerRot::YXZ);
    let target = (-direction.x).atan2(-direction.z);
    let diff = (target - yaw + PI).rem_euclid(TAU) - PI;
    Quat::from_rotation_y(yaw + diff.clamp(-max_step, max_step))
}

fn approach(from: Vec3, to: Vec3, max_delta: f32) -> Vec3 {
    let delta = to - from;
    let distance = delta.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        to
    } else {
        from + delta / distance * max_delta
    }
}
