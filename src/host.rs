//! [`MovementHost`] implementation over a Bevy [`World`].

use std::marker::PhantomData;

use bevy::audio::Volume;
use bevy::prelude::*;

use crate::arbiter::MovementHost;
use crate::backend::CharacterPhysicsBackend;
use crate::config::{CharacterController, ControllerConfig};
use crate::cooldown::WallJumpCooldown;
use crate::cues::{JumpCues, JumpEffect};
use crate::detection::SensorCast;

/// Exposes one character entity to the [`JumpArbiter`](crate::arbiter::JumpArbiter).
///
/// Physics goes through the backend `B`. Effects, sounds and the wall jump
/// cooldown are plain ECS operations.
pub struct WorldMovementHost<'w, B: CharacterPhysicsBackend> {
    world: &'w mut World,
    entity: Entity,
    _backend: PhantomData<B>,
}

impl<'w, B: CharacterPhysicsBackend> WorldMovementHost<'w, B> {
    pub fn new(world: &'w mut World, entity: Entity) -> Self {
        Self {
            world,
            entity,
            _backend: PhantomData,
        }
    }

    fn effect_lifetime(&self) -> f32 {
        self.world
            .get::<JumpCues>(self.entity)
            .map(|cues| cues.effect_lifetime)
            .unwrap_or_else(|| JumpCues::default().effect_lifetime)
    }
}

impl<B: CharacterPhysicsBackend> MovementHost for WorldMovementHost<'_, B> {
    fn is_falling(&self) -> bool {
        self.world
            .get::<CharacterController>(self.entity)
            .is_none_or(CharacterController::is_falling)
    }

    fn location(&self) -> Vec3 {
        B::get_position(&*self.world, self.entity)
    }

    fn rotation(&self) -> Quat {
        B::get_rotation(&*self.world, self.entity)
    }

    fn cast_ray(&mut self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<SensorCast> {
        B::cast_ray(self.world, self.entity, origin, direction, max_distance)
    }

    fn launch(&mut self, velocity: Vec3, override_horizontal: bool, override_vertical: bool) {
        let current = B::get_velocity(self.world, self.entity);
        let mut new_velocity = current;
        if override_horizontal {
            new_velocity.x = velocity.x;
            new_velocity.z = velocity.z;
        } else {
            new_velocity.x += velocity.x;
            new_velocity.z += velocity.z;
        }
        if override_vertical {
            new_velocity.y = velocity.y;
        } else {
            new_velocity.y += velocity.y;
        }
        B::set_velocity(self.world, self.entity, new_velocity);
    }

    fn set_vertical_velocity(&mut self, velocity: f32) {
        let mut current = B::get_velocity(self.world, self.entity);
        current.y = velocity;
        B::set_velocity(self.world, self.entity, current);
    }

    fn default_jump(&mut self) {
        let jump_velocity = self
            .world
            .get::<ControllerConfig>(self.entity)
            .map(|config| config.jumping.jump_velocity)
            .unwrap_or_default();
        let mut current = B::get_velocity(self.world, self.entity);
        current.y = current.y.max(jump_velocity);
        B::set_velocity(self.world, self.entity, current);
    }

    fn spawn_effect(&mut self, effect: &Handle<Scene>, location: Vec3, rotation: Quat) {
        let lifetime = self.effect_lifetime();
        self.world.spawn((
            Name::new("Jump Effect"),
            SceneRoot(effect.clone()),
            Transform::from_translation(location).with_rotation(rotation),
            JumpEffect::new(lifetime),
        ));
    }

    fn play_sound(&mut self, sound: &Handle<AudioSource>, location: Vec3, volume: f32, pitch: f32) {
        self.world.spawn((
            Name::new("Jump Sound"),
            AudioPlayer::new(sound.clone()),
            PlaybackSettings::DESPAWN
                .with_volume(Volume::Linear(volume))
                .with_speed(pitch)
                .with_spatial(true),
            Transform::from_translation(location),
        ));
    }

    fn schedule_wall_jump_reset(&mut self, delay: f32) {
        self.world
            .entity_mut(self.entity)
            .insert(WallJumpCooldown::new(delay));
    }
}
