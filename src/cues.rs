//! Visual and audio feedback for jumps.
//!
//! Every handle is optional. A missing handle means there is nothing to play.

use bevy::prelude::*;

/// Effect scenes and sounds played by double and wall jumps.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct JumpCues {
    /// Scene spawned at the character (plus offset) on a double jump.
    pub double_jump_effect: Option<Handle<Scene>>,
    /// Sound played at the character on a double jump.
    pub double_jump_sound: Option<Handle<AudioSource>>,
    /// Scene spawned at the wall impact point on a wall jump.
    pub wall_jump_effect: Option<Handle<Scene>>,
    /// Sound played at the wall impact point on a wall jump.
    pub wall_jump_sound: Option<Handle<AudioSource>>,
    /// Seconds an effect scene stays alive before it is despawned.
    pub effect_lifetime: f32,
}

impl Default for JumpCues {
    fn default() -> Self {
        Self {
            double_jump_effect: None,
            double_jump_sound: None,
            wall_jump_effect: None,
            wall_jump_sound: None,
            effect_lifetime: 2.0,
        }
    }
}

impl JumpCues {
    /// Builder: set double jump effect and sound.
    pub fn with_double_jump(
        mut self,
        effect: Option<Handle<Scene>>,
        sound: Option<Handle<AudioSource>>,
    ) -> Self {
        self.double_jump_effect = effect;
        self.double_jump_sound = sound;
        self
    }

    /// Builder: set wall jump effect and sound.
    pub fn with_wall_jump(
        mut self,
        effect: Option<Handle<Scene>>,
        sound: Option<Handle<AudioSource>>,
    ) -> Self {
        self.wall_jump_effect = effect;
        self.wall_jump_sound = sound;
        self
    }
}

/// A spawned jump effect. Despawned once its lifetime runs out.
#[derive(Component, Debug, Clone)]
pub struct JumpEffect {
    pub lifetime: Timer,
}

impl JumpEffect {
    pub fn new(lifetime_secs: f32) -> Self {
        Self {
            lifetime: Timer::from_seconds(lifetime_secs, TimerMode::Once),
        }
    }
}

/// Despawn jump effects whose lifetime has elapsed.
pub fn despawn_finished_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut JumpEffect)>,
) {
    for (entity, mut effect) in &mut effects {
        if effect.lifetime.tick(time.delta()).is_finished() {
            commands.entity(entity).despawn();
        }
    }
}
