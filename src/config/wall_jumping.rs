//! Configuration for wall jump mechanics.

use bevy::prelude::*;

/// Configuration for wall jump mechanics.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct WallJumpingConfig {
    /// Whether wall jumping is enabled.
    pub enabled: bool,

    /// Vertical component of the wall jump launch (units/second).
    pub force: f32,

    /// Launch speed away from the wall along its normal (units/second).
    pub horizontal_force: f32,

    /// Length of each of the four wall probes.
    pub detection_range: f32,

    /// Duration (seconds) after a wall jump before another one is allowed.
    pub cooldown: f32,

    /// Pick the closest wall among all probe directions instead of the first
    /// direction (right, left, forward, back) that hits.
    pub nearest_hit: bool,
}

impl Default for WallJumpingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            force: 700.0,
            horizontal_force: 500.0,
            detection_range: 50.0,
            cooldown: 0.1,
            nearest_hit: false,
        }
    }
}
