//! Configuration for the ground sensor.

use bevy::prelude::*;

/// Configuration for the ground sensor.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct SensorConfig {
    /// How far below the collider bottom ground is still detected.
    pub ground_check_distance: f32,

    /// Upward speed above which the character never counts as grounded,
    /// so the step right after a jump is already airborne.
    pub max_grounded_rise_speed: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            ground_check_distance: 2.4,
            max_grounded_rise_speed: 10.0,
        }
    }
}
