//! Default pawn spawning.
//!
//! [`GameModePlugin`] spawns one keyboard driven character at startup from the
//! [`DefaultPawn`] resource. Insert the resource before adding the plugin to
//! customize it, or set `enabled` to `false` to spawn characters yourself.

use std::marker::PhantomData;

use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::config::{CharacterController, ControllerConfig};
use crate::cues::JumpCues;
use crate::input::PlayerControlled;

/// Description of the character spawned by [`GameModePlugin`].
#[derive(Resource, Debug, Clone)]
pub struct DefaultPawn {
    /// Spawn the pawn at startup.
    pub enabled: bool,
    /// Capsule radius.
    pub radius: f32,
    /// Capsule half height, center to tip.
    pub half_height: f32,
    pub transform: Transform,
    pub config: ControllerConfig,
    pub cues: JumpCues,
}

impl Default for DefaultPawn {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 42.0,
            half_height: 96.0,
            transform: Transform::from_xyz(0.0, 200.0, 0.0),
            config: ControllerConfig::default(),
            cues: JumpCues::default(),
        }
    }
}

impl DefaultPawn {
    pub fn at(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cues(mut self, cues: JumpCues) -> Self {
        self.cues = cues;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Spawns the [`DefaultPawn`] on backend `B` at startup.
pub struct GameModePlugin<B: CharacterPhysicsBackend>(PhantomData<B>);

impl<B: CharacterPhysicsBackend> Default for GameModePlugin<B> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<B: CharacterPhysicsBackend> Plugin for GameModePlugin<B> {
    fn build(&self, app: &mut App) {
        app.init_resource::<DefaultPawn>();
        app.add_systems(Startup, spawn_default_pawn::<B>);
    }
}

fn spawn_default_pawn<B: CharacterPhysicsBackend>(mut commands: Commands, pawn: Res<DefaultPawn>) {
    if !pawn.enabled {
        debug!("default pawn disabled");
        return;
    }

    let entity = commands
        .spawn((
            Name::new("Default Pawn"),
            PlayerControlled,
            CharacterController::new(),
            pawn.config,
            pawn.cues.clone(),
            pawn.transform,
            B::capsule_body(pawn.radius, pawn.half_height),
        ))
        .id();

    info!(
        "spawned default pawn {entity} at {}",
        pawn.transform.translation
    );
}
