//! Third-person character controller for Bevy.
//!
//! A physics-backed character that walks, jumps, double jumps once per airtime
//! and kicks off nearby walls. The jump decision lives in [`JumpArbiter`],
//! which only talks to the character through the [`MovementHost`] capability
//! trait; inside Bevy that host is backed by a [`CharacterPhysicsBackend`].
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use avian3d::prelude::*;
//! use third_person_character::prelude::*;
//!
//! App::new()
//!     .add_plugins((DefaultPlugins, PhysicsPlugins::default()))
//!     .add_plugins(CharacterControllerPlugin::<Avian3dBackend>::default())
//!     .add_plugins(KeyboardInputPlugin)
//!     .add_plugins(GameModePlugin::<Avian3dBackend>::default())
//!     .run();
//! ```
//!
//! [`JumpArbiter`]: arbiter::JumpArbiter
//! [`MovementHost`]: arbiter::MovementHost
//! [`CharacterPhysicsBackend`]: backend::CharacterPhysicsBackend

use std::marker::PhantomData;

use bevy::prelude::*;

pub mod arbiter;
pub mod backend;
pub mod config;
pub mod cooldown;
pub mod cues;
pub mod detection;
pub mod game_mode;
pub mod host;
pub mod input;
pub mod intent;
pub mod systems;

#[cfg(feature = "avian3d")]
pub mod avian;

use arbiter::JumpState;
use backend::CharacterPhysicsBackend;
use config::{CharacterController, ControllerConfig};
use cues::JumpCues;
use detection::SensorCast;
use intent::MovementIntent;
use systems::{CharacterLanded, JumpPerformed};

pub mod prelude {
    pub use crate::arbiter::{JumpAction, JumpArbiter, JumpState, MovementHost, ProbeDirection, WallProbe};
    pub use crate::backend::CharacterPhysicsBackend;
    pub use crate::config::{
        CharacterController, ControllerConfig, DoubleJumpConfig, JumpingConfig, SensorConfig,
        WalkingConfig, WallJumpingConfig,
    };
    pub use crate::cooldown::WallJumpCooldown;
    pub use crate::cues::{JumpCues, JumpEffect};
    pub use crate::detection::SensorCast;
    pub use crate::game_mode::{DefaultPawn, GameModePlugin};
    pub use crate::input::{ControlFrame, InputBindings, KeyboardInputPlugin, PlayerControlled};
    pub use crate::intent::MovementIntent;
    pub use crate::systems::{CharacterLanded, JumpPerformed};
    pub use crate::{CharacterControllerPlugin, CharacterControllerSet};

    #[cfg(feature = "avian3d")]
    pub use crate::avian::Avian3dBackend;
}

/// Ordering of the controller systems inside [`FixedUpdate`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterControllerSet {
    /// Backend ground detection.
    Sensors,
    /// Airborne to grounded transitions.
    Landing,
    /// Jump request resolution.
    Jumping,
    /// Walking and turning.
    Movement,
    /// Wall jump cooldown ticking.
    Cooldowns,
}

/// Adds the character controller running on physics backend `B`.
pub struct CharacterControllerPlugin<B: CharacterPhysicsBackend>(PhantomData<B>);

impl<B: CharacterPhysicsBackend> Default for CharacterControllerPlugin<B> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<B: CharacterPhysicsBackend> Plugin for CharacterControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        app.add_plugins(B::plugin());

        app.add_message::<JumpPerformed>()
            .add_message::<CharacterLanded>();

        app.register_type::<CharacterController>()
            .register_type::<ControllerConfig>()
            .register_type::<MovementIntent>()
            .register_type::<JumpState>()
            .register_type::<JumpCues>()
            .register_type::<SensorCast>();

        app.register_required_components::<CharacterController, JumpState>();

        app.configure_sets(
            FixedUpdate,
            (
                CharacterControllerSet::Sensors,
                CharacterControllerSet::Landing,
                CharacterControllerSet::Jumping,
                CharacterControllerSet::Movement,
                CharacterControllerSet::Cooldowns,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::update_landing.in_set(CharacterControllerSet::Landing),
                systems::process_jump_requests::<B>.in_set(CharacterControllerSet::Jumping),
                systems::apply_walking::<B>.in_set(CharacterControllerSet::Movement),
                cooldown::tick_wall_jump_cooldowns.in_set(CharacterControllerSet::Cooldowns),
            ),
        );

        app.add_systems(Update, cues::despawn_finished_effects);
    }
}
