//! Movement intent component.
//!
//! Intents represent the desired movement from player input or AI.
//! The controller systems read these intents and apply the physics.

use bevy::prelude::*;

/// Movement and jump intent for a character.
///
/// `move_input` is expressed in the control frame: `x` is right, `y` is
/// forward. The control frame is the world rotated by `control_yaw` around
/// the up axis, typically the yaw of whatever camera follows the character.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use third_person_character::prelude::*;
///
/// let mut intent = MovementIntent::new();
/// intent.set_move(Vec2::new(0.0, 1.0));
/// assert!(intent.is_moving());
///
/// // Pressing jump latches a request until the controller takes it.
/// intent.set_jump_pressed(true);
/// assert!(intent.take_jump_request());
/// assert!(!intent.take_jump_request());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Planar movement input, clamped to unit length.
    pub move_input: Vec2,
    /// Yaw (radians) of the control frame around the up axis.
    pub control_yaw: f32,
    /// Whether the jump input is currently held.
    pub jump_pressed: bool,
    /// Latched jump request, set on the rising edge of `jump_pressed`.
    jump_request: bool,
}

impl MovementIntent {
    /// Create a new empty movement intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the planar movement input (x = right, y = forward).
    pub fn set_move(&mut self, input: Vec2) {
        self.move_input = input.clamp_length_max(1.0);
    }

    /// Set the control frame yaw (radians).
    pub fn set_control_yaw(&mut self, yaw: f32) {
        self.control_yaw = yaw;
    }

    /// Update the jump input. A press that was not held before requests a jump.
    pub fn set_jump_pressed(&mut self, pressed: bool) {
        if pressed && !self.jump_pressed {
            self.jump_request = true;
        }
        self.jump_pressed = pressed;
    }

    /// Request a jump directly, regardless of the held state.
    pub fn request_jump(&mut self) {
        self.jump_request = true;
    }

    /// Whether a jump request is waiting to be processed.
    pub fn has_jump_request(&self) -> bool {
        self.jump_request
    }

    /// Consume the pending jump request, returning whether there was one.
    pub fn take_jump_request(&mut self) -> bool {
        std::mem::take(&mut self.jump_request)
    }

    /// Clear movement input and any pending jump request.
    pub fn clear(&mut self) {
        self.move_input = Vec2::ZERO;
        self.jump_pressed = false;
        self.jump_request = false;
    }

    /// Check if there is active movement input.
    pub fn is_moving(&self) -> bool {
        self.move_input.length_squared() > 1e-6
    }

    /// Movement input rotated into world space on the horizontal plane.
    ///
    /// Length equals the input magnitude (at most 1.0).
    pub fn world_direction(&self) -> Vec3 {
        let rotation = Quat::from_rotation_y(self.control_yaw);
        let forward = rotation * Vec3::NEG_Z;
        let right = rotation * Vec3::X;
        forward * self.move_input.y + right * self.move_input.x
    }
}
