//! Wall jump cooldown.
//!
//! A wall jump inserts a one-shot [`WallJumpCooldown`] on the character. When
//! the timer finishes the wall jump is re-armed and the component is removed,
//! so each wall jump re-arms exactly once. A cooldown starts counting from the
//! step after it was inserted. Despawning the character drops the pending
//! cooldown with it.

use bevy::prelude::*;

use crate::arbiter::{JumpArbiter, JumpState};

/// Pending wall jump cooldown.
#[derive(Component, Debug, Clone)]
pub struct WallJumpCooldown(pub Timer);

impl WallJumpCooldown {
    pub fn new(delay_secs: f32) -> Self {
        Self(Timer::from_seconds(delay_secs.max(0.0), TimerMode::Once))
    }

    /// Seconds left before the wall jump is re-armed.
    pub fn remaining_secs(&self) -> f32 {
        self.0.remaining_secs()
    }
}

/// Tick wall jump cooldowns and re-arm the wall jump when they fire.
pub fn tick_wall_jump_cooldowns(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut WallJumpCooldown, &mut JumpState)>,
) {
    for (entity, mut cooldown, mut state) in &mut q {
        // The step that started the cooldown elapsed before the wall jump.
        if cooldown.is_added() {
            continue;
        }
        if cooldown.0.tick(time.delta()).is_finished() {
            JumpArbiter::on_wall_jump_cooldown_elapsed(&mut state);
            commands.entity(entity).remove::<WallJumpCooldown>();
            trace!("wall jump re-armed for {entity}");
        }
    }
}
