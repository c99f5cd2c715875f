//! Jump arbitration.
//!
//! The [`JumpArbiter`] turns a jump request into exactly one [`JumpAction`]:
//! a wall jump, a double jump, the default grounded jump, or nothing. It never
//! talks to the ECS or the physics engine directly. Everything it needs from
//! the outside world goes through the [`MovementHost`] capability, so the same
//! decision logic runs against a Bevy [`World`](crate::host::WorldMovementHost)
//! or a test double.

use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::cues::JumpCues;
use crate::detection::SensorCast;

/// Per-character jump flags.
///
/// Only the arbiter, the landing callback and the wall jump cooldown mutate
/// these.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct JumpState {
    /// True on the ground and after landing, false once the double jump has
    /// been spent in the air.
    pub can_double_jump: bool,
    /// False from a wall jump until its cooldown fires.
    pub can_wall_jump: bool,
}

impl Default for JumpState {
    fn default() -> Self {
        Self {
            can_double_jump: true,
            can_wall_jump: true,
        }
    }
}

/// Outcome of a single jump request.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub enum JumpAction {
    /// Launched away from a wall.
    WallJump {
        /// Velocity the character was launched with.
        launch: Vec3,
        /// Normal of the wall that was pushed off.
        normal: Vec3,
    },
    /// Vertical velocity was overwritten in the air.
    DoubleJump {
        /// The vertical velocity that was set.
        velocity: f32,
    },
    /// Grounded: the host performed its standard jump.
    DefaultJump,
    /// Airborne with nothing left to spend. The request was discarded.
    None,
}

/// One of the four horizontal wall probe directions, relative to the
/// character's facing.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeDirection {
    Right,
    Left,
    Forward,
    Back,
}

impl ProbeDirection {
    /// Probe order. With first-hit selection an earlier direction wins even
    /// when a later one finds a closer wall.
    pub const ORDER: [ProbeDirection; 4] = [
        ProbeDirection::Right,
        ProbeDirection::Left,
        ProbeDirection::Forward,
        ProbeDirection::Back,
    ];

    /// World-space direction for a character with the given rotation.
    pub fn resolve(self, rotation: Quat) -> Dir3 {
        let local = match self {
            ProbeDirection::Right => Dir3::X,
            ProbeDirection::Left => Dir3::NEG_X,
            ProbeDirection::Forward => Dir3::NEG_Z,
            ProbeDirection::Back => Dir3::Z,
        };
        rotation * local
    }
}

/// A wall found by probing. Transient: recomputed on every jump request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallProbe {
    /// Direction whose ray found the wall.
    pub direction: ProbeDirection,
    /// Surface normal at the hit.
    pub normal: Vec3,
    /// Impact point in world space.
    pub point: Vec3,
    /// Distance from the character to the impact point.
    pub distance: f32,
}

/// Capabilities the arbiter needs from the engine hosting the character.
///
/// Implemented for Bevy by [`WorldMovementHost`](crate::host::WorldMovementHost).
pub trait MovementHost {
    /// Whether the character is airborne.
    fn is_falling(&self) -> bool;

    /// Character location in world space.
    fn location(&self) -> Vec3;

    /// Character rotation in world space.
    fn rotation(&self) -> Quat;

    /// Cast a ray that ignores the character itself.
    fn cast_ray(&mut self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<SensorCast>;

    /// Instantaneously change the character's velocity.
    ///
    /// For each axis group, an override replaces the current velocity and
    /// otherwise `velocity` is added to it.
    fn launch(&mut self, velocity: Vec3, override_horizontal: bool, override_vertical: bool);

    /// Overwrite the vertical velocity component.
    fn set_vertical_velocity(&mut self, velocity: f32);

    /// Perform the host's standard grounded jump.
    fn default_jump(&mut self);

    /// Spawn a visual effect.
    fn spawn_effect(&mut self, effect: &Handle<Scene>, location: Vec3, rotation: Quat);

    /// Play a sound.
    fn play_sound(&mut self, sound: &Handle<AudioSource>, location: Vec3, volume: f32, pitch: f32);

    /// Re-enable the wall jump once `delay` seconds have passed, by calling
    /// [`JumpArbiter::on_wall_jump_cooldown_elapsed`].
    fn schedule_wall_jump_reset(&mut self, delay: f32);
}

/// Decides and applies jumps for one character.
pub struct JumpArbiter<'a> {
    config: &'a ControllerConfig,
    cues: &'a JumpCues,
}

impl<'a> JumpArbiter<'a> {
    pub fn new(config: &'a ControllerConfig, cues: &'a JumpCues) -> Self {
        Self { config, cues }
    }

    /// Handle a jump request. Applies exactly one action and returns it.
    ///
    /// First matching rule wins:
    /// 1. falling, a wall is probed and `can_wall_jump`: wall jump
    /// 2. falling and `can_double_jump`: double jump
    /// 3. grounded: the host's default jump
    /// 4. otherwise nothing happens
    pub fn on_jump_requested<H: MovementHost + ?Sized>(
        &self,
        state: &mut JumpState,
        host: &mut H,
    ) -> JumpAction {
        if !host.is_falling() {
            host.default_jump();
            debug!("jump: default");
            return JumpAction::DefaultJump;
        }

        if self.config.wall_jumping.enabled {
            if let Some(probe) = self.compute_wall_probe(host) {
                if state.can_wall_jump {
                    return self.wall_jump(state, host, probe);
                }
                trace!("jump: wall at {:?} ignored, cooling down", probe.point);
            }
        }

        if state.can_double_jump {
            return self.double_jump(state, host);
        }

        debug!("jump: discarded, double jump already spent");
        JumpAction::None
    }

    /// Probe the four horizontal directions for a wall to push off.
    ///
    /// Hits on bodies that simulate physics are skipped. By default the first
    /// direction in [`ProbeDirection::ORDER`] that hits wins. With
    /// `nearest_hit` the closest hit across all directions wins instead.
    pub fn compute_wall_probe<H: MovementHost + ?Sized>(&self, host: &mut H) -> Option<WallProbe> {
        let settings = &self.config.wall_jumping;
        let origin = host.location();
        let rotation = host.rotation();

        let mut best: Option<WallProbe> = None;
        for direction in ProbeDirection::ORDER {
            let Some(hit) = host.cast_ray(origin, direction.resolve(rotation), settings.detection_range)
            else {
                continue;
            };
            if !hit.is_wall_jumpable() {
                trace!("wall probe {direction:?}: hit simulated body, skipping");
                continue;
            }

            let probe = WallProbe {
                direction,
                normal: hit.normal,
                point: hit.point,
                distance: hit.distance,
            };
            if !settings.nearest_hit {
                return Some(probe);
            }
            if best.is_none_or(|b| probe.distance < b.distance) {
                best = Some(probe);
            }
        }
        best
    }

    /// Landing callback. Re-arms the double jump and leaves the wall jump
    /// cooldown alone.
    pub fn on_landed(state: &mut JumpState) {
        state.can_double_jump = true;
    }

    /// Cooldown callback scheduled by a wall jump.
    pub fn on_wall_jump_cooldown_elapsed(state: &mut JumpState) {
        state.can_wall_jump = true;
    }

    fn wall_jump<H: MovementHost + ?Sized>(
        &self,
        state: &mut JumpState,
        host: &mut H,
        probe: WallProbe,
    ) -> JumpAction {
        let settings = &self.config.wall_jumping;
        let launch = probe.normal * settings.horizontal_force + Vec3::Y * settings.force;

        host.launch(launch, true, true);
        state.can_wall_jump = false;

        if let Some(effect) = &self.cues.wall_jump_effect {
            host.spawn_effect(effect, probe.point, facing(probe.normal));
        }
        if let Some(sound) = &self.cues.wall_jump_sound {
            host.play_sound(sound, probe.point, 1.0, 1.0);
        }

        host.schedule_wall_jump_reset(settings.cooldown);

        debug!(
            "jump: wall jump off {:?} wall, launch {launch:?}",
            probe.direction
        );
        JumpAction::WallJump {
            launch,
            normal: probe.normal,
        }
    }

    fn double_jump<H: MovementHost + ?Sized>(&self, state: &mut JumpState, host: &mut H) -> JumpAction {
        let settings = &self.config.double_jump;

        host.set_vertical_velocity(settings.velocity);
        state.can_double_jump = false;

        let location = host.location();
        if let Some(effect) = &self.cues.double_jump_effect {
            let rotation = host.rotation();
            host.spawn_effect(effect, location + settings.effect_offset, rotation);
        }
        if let Some(sound) = &self.cues.double_jump_sound {
            host.play_sound(sound, location, 1.0, 1.0);
        }

        debug!("jump: double jump");
        JumpAction::DoubleJump {
            velocity: settings.velocity,
        }
    }
}

/// Rotation that points an effect's forward axis along `normal`.
fn facing(normal: Vec3) -> Quat {
    match normal.try_normalize() {
        Some(normal) => Quat::from_rotation_arc(Vec3::NEG_Z, normal),
        None => Quat::IDENTITY,
    }
}
