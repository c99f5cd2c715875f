//! Configuration for the airborne double jump.

use bevy::prelude::*;

/// Configuration for the airborne double jump.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct DoubleJumpConfig {
    /// Vertical velocity set by a double jump (units/second).
    /// Overwrites the current vertical velocity instead of adding to it.
    pub velocity: f32,

    /// Offset from the character location where the double jump effect spawns.
    pub effect_offset: Vec3,
}

impl Default for DoubleJumpConfig {
    fn default() -> Self {
        Self {
            velocity: 700.0,
            effect_offset: Vec3::ZERO,
        }
    }
}
