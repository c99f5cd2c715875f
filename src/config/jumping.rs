//! Configuration for the grounded (default) jump.

use bevy::prelude::*;

/// Configuration for the grounded (default) jump.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct JumpingConfig {
    /// Vertical velocity given by a jump from the ground (units/second).
    ///
    /// The jump never slows an already faster ascent: the resulting vertical
    /// velocity is the maximum of this value and the current one.
    pub jump_velocity: f32,
}

impl Default for JumpingConfig {
    fn default() -> Self {
        Self {
            jump_velocity: 700.0,
        }
    }
}
