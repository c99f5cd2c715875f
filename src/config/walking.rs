//! Configuration for ground movement.

use bevy::prelude::*;

/// Configuration for ground movement.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct WalkingConfig {
    /// Maximum horizontal movement speed (units/second).
    pub max_walk_speed: f32,

    /// Lowest speed used for any non-zero analog input (units/second).
    pub min_analog_walk_speed: f32,

    /// Horizontal acceleration rate (units/second^2).
    pub acceleration: f32,

    /// Air control multiplier applied to acceleration while falling (0.0-1.0).
    pub air_control: f32,

    /// Deceleration without input while grounded (units/second^2).
    pub braking_deceleration_walking: f32,

    /// Deceleration without input while falling (units/second^2).
    pub braking_deceleration_falling: f32,

    /// Whether the character turns to face its movement direction.
    pub orient_rotation_to_movement: bool,

    /// Turn rate when orienting to movement (degrees/second).
    pub rotation_rate: f32,

    /// Maximum slope angle the character can stand on (radians).
    pub max_slope_angle: f32,
}

impl Default for WalkingConfig {
    fn default() -> Self {
        Self {
            max_walk_speed: 500.0,
            min_analog_walk_speed: 20.0,
            acceleration: 2048.0,
            air_control: 0.35,
            braking_deceleration_walking: 2000.0,
            braking_deceleration_falling: 1500.0,
            orient_rotation_to_movement: true,
            rotation_rate: 500.0,
            max_slope_angle: 44.765_f32.to_radians(),
        }
    }
}
