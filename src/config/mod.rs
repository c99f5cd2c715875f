//! Controller configuration and state components.
//!
//! Tunables are grouped into small per-mechanic structs and composed into
//! [`ControllerConfig`]. Nothing in the controller mutates a config at runtime.

mod double_jump;
mod jumping;
mod sensors;
mod walking;
mod wall_jumping;

pub use double_jump::DoubleJumpConfig;
pub use jumping::JumpingConfig;
pub use sensors::SensorConfig;
pub use walking::WalkingConfig;
pub use wall_jumping::WallJumpingConfig;

use bevy::prelude::*;

use crate::detection::SensorCast;

/// Core character controller component.
///
/// Holds sensor RESULTS for the current fixed step. Backends write them in
/// [`CharacterControllerSet::Sensors`](crate::CharacterControllerSet::Sensors).
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct CharacterController {
    /// Whether the character stands on walkable ground this step.
    pub is_grounded: bool,
    /// Grounded state of the previous step (landing edge detection).
    pub was_grounded: bool,
    /// Ground hit under the character, walkable or not.
    pub ground: Option<SensorCast>,
    /// Distance from the body origin to the bottom of its collider.
    pub collider_bottom_offset: f32,
}

impl CharacterController {
    /// Create a new controller. Starts airborne until the first sensor pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the character is in the air.
    #[inline]
    pub fn is_falling(&self) -> bool {
        !self.is_grounded
    }

    /// Whether this step is the transition from airborne to grounded.
    #[inline]
    pub fn just_landed(&self) -> bool {
        self.is_grounded && !self.was_grounded
    }

    /// Get the ground normal, if ground was detected.
    pub fn ground_normal(&self) -> Option<Vec3> {
        self.ground.map(|g| g.normal)
    }

    /// Reset all detection state (called before each sensor pass).
    pub(crate) fn reset_detection_state(&mut self) {
        self.is_grounded = false;
        self.ground = None;
    }
}

/// Configuration parameters for the character controller.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct ControllerConfig {
    /// Grounded jump.
    pub jumping: JumpingConfig,
    /// Airborne double jump.
    pub double_jump: DoubleJumpConfig,
    /// Wall jump and wall probing.
    pub wall_jumping: WallJumpingConfig,
    /// Ground and air movement.
    pub walking: WalkingConfig,
    /// Ground sensor.
    pub sensors: SensorConfig,
}

impl ControllerConfig {
    /// Builder: set the grounded jump velocity.
    pub fn with_jump_velocity(mut self, velocity: f32) -> Self {
        self.jumping.jump_velocity = velocity;
        self
    }

    /// Builder: set the double jump velocity.
    pub fn with_double_jump_velocity(mut self, velocity: f32) -> Self {
        self.double_jump.velocity = velocity;
        self
    }

    /// Builder: set the double jump effect offset.
    pub fn with_effect_offset(mut self, offset: Vec3) -> Self {
        self.double_jump.effect_offset = offset;
        self
    }

    /// Builder: set wall jump vertical and horizontal launch forces.
    pub fn with_wall_jump_forces(mut self, vertical: f32, horizontal: f32) -> Self {
        self.wall_jumping.force = vertical;
        self.wall_jumping.horizontal_force = horizontal;
        self
    }

    /// Builder: set the wall probe length.
    pub fn with_wall_detection_range(mut self, range: f32) -> Self {
        self.wall_jumping.detection_range = range;
        self
    }

    /// Builder: set the wall jump cooldown (seconds).
    pub fn with_wall_jump_cooldown(mut self, cooldown: f32) -> Self {
        self.wall_jumping.cooldown = cooldown;
        self
    }

    /// Builder: enable or disable wall jumping.
    pub fn with_wall_jumping_enabled(mut self, enabled: bool) -> Self {
        self.wall_jumping.enabled = enabled;
        self
    }

    /// Builder: set walk speed and acceleration.
    pub fn with_movement(mut self, max_speed: f32, acceleration: f32) -> Self {
        self.walking.max_walk_speed = max_speed;
        self.walking.acceleration = acceleration;
        self
    }

    /// Builder: set air control.
    pub fn with_air_control(mut self, air_control: f32) -> Self {
        self.walking.air_control = air_control;
        self
    }
}
