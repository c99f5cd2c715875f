//! Keyboard input mapping.
//!
//! Feeds [`MovementIntent`] of every [`PlayerControlled`] character from
//! [`ButtonInput<KeyCode>`]. Runs in [`PreUpdate`] so fixed step systems see
//! the input of the current frame.

use bevy::input::InputSystems;
use bevy::prelude::*;

use crate::intent::MovementIntent;

/// Marks a character driven by local keyboard input.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
#[require(MovementIntent)]
pub struct PlayerControlled;

/// Entity whose facing defines the control frame of a player character,
/// typically the camera following it.
///
/// Only the yaw is used. A frame looking straight up or down keeps the
/// previous yaw.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct ControlFrame(pub Entity);

/// Yaw around the up axis of a rotation's forward (-Z) direction.
pub fn control_yaw(rotation: Quat) -> Option<f32> {
    let forward = rotation * Vec3::NEG_Z;
    let planar = Vec2::new(forward.x, forward.z);
    (planar.length_squared() > 1e-6).then(|| (-planar.x).atan2(-planar.y))
}

/// Keys bound to each character action. Any bound key triggers the action.
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct InputBindings {
    pub jump: Vec<KeyCode>,
    pub forward: Vec<KeyCode>,
    pub back: Vec<KeyCode>,
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            jump: vec![KeyCode::Space],
            forward: vec![KeyCode::KeyW, KeyCode::ArrowUp],
            back: vec![KeyCode::KeyS, KeyCode::ArrowDown],
            left: vec![KeyCode::KeyA, KeyCode::ArrowLeft],
            right: vec![KeyCode::KeyD, KeyCode::ArrowRight],
        }
    }
}

impl InputBindings {
    /// Whether any key is bound to jump.
    pub fn has_jump(&self) -> bool {
        !self.jump.is_empty()
    }

    /// Planar movement axis from the held keys (x = right, y = forward).
    pub fn move_axis(&self, keys: &ButtonInput<KeyCode>) -> Vec2 {
        let axis = |positive: &[KeyCode], negative: &[KeyCode]| {
            let pos = keys.any_pressed(positive.iter().copied()) as i8;
            let neg = keys.any_pressed(negative.iter().copied()) as i8;
            f32::from(pos - neg)
        };
        Vec2::new(
            axis(&self.right, &self.left),
            axis(&self.forward, &self.back),
        )
    }

    pub fn jump_held(&self, keys: &ButtonInput<KeyCode>) -> bool {
        keys.any_pressed(self.jump.iter().copied())
    }
}

/// Plugin mapping keyboard state to [`MovementIntent`].
///
/// Movement keys are relative to the control frame. Without a [`ControlFrame`]
/// the intent's `control_yaw` is left as is, so input stays world relative
/// unless something else writes it.
pub struct KeyboardInputPlugin;

impl Plugin for KeyboardInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputBindings>()
            .register_type::<InputBindings>()
            .register_type::<PlayerControlled>()
            .register_type::<ControlFrame>();

        app.add_systems(Startup, validate_bindings);
        app.add_systems(PreUpdate, apply_keyboard_input.after(InputSystems));
    }
}

fn validate_bindings(bindings: Res<InputBindings>) {
    if !bindings.has_jump() {
        error!("no key is bound to jump; characters will not be able to jump");
    }
}

/// Write the keyboard state into each player controlled intent.
pub fn apply_keyboard_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<InputBindings>,
    mut q: Query<(&mut MovementIntent, Option<&ControlFrame>), With<PlayerControlled>>,
    q_frames: Query<&GlobalTransform>,
) {
    let Some(keys) = keys else {
        return;
    };

    let axis = bindings.move_axis(&keys);
    let jump = bindings.jump_held(&keys);

    for (mut intent, frame) in &mut q {
        let yaw = frame
            .and_then(|frame| q_frames.get(frame.0).ok())
            .and_then(|transform| control_yaw(transform.rotation()));
        if let Some(yaw) = yaw {
            intent.set_control_yaw(yaw);
        }
        intent.set_move(axis);
        intent.set_jump_pressed(jump);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn create_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_plugins(KeyboardInputPlugin);
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    fn release(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
    }

    #[test]
    fn player_controlled_requires_intent() {
        let mut app = create_test_app();
        let entity = app.world_mut().spawn(PlayerControlled).id();
        assert!(app.world().get::<MovementIntent>(entity).is_some());
    }

    #[test]
    fn movement_keys_set_move_input() {
        let mut app = create_test_app();
        let entity = app.world_mut().spawn(PlayerControlled).id();

        press(&mut app, KeyCode::KeyW);
        press(&mut app, KeyCode::KeyD);
        app.update();

        let intent = app.world().get::<MovementIntent>(entity).unwrap();
        assert!((intent.move_input - Vec2::new(1.0, 1.0).normalize()).length() < 1e-5);

        release(&mut app, KeyCode::KeyW);
        release(&mut app, KeyCode::KeyD);
        app.update();

        let intent = app.world().get::<MovementIntent>(entity).unwrap();
        assert!(!intent.is_moving());
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut app = create_test_app();
        let entity = app.world_mut().spawn(PlayerControlled).id();

        press(&mut app, KeyCode::KeyA);
        press(&mut app, KeyCode::ArrowRight);
        app.update();

        let intent = app.world().get::<MovementIntent>(entity).unwrap();
        assert_eq!(intent.move_input, Vec2::ZERO);
    }

    #[test]
    fn holding_jump_requests_once() {
        let mut app = create_test_app();
        let entity = app.world_mut().spawn(PlayerControlled).id();

        press(&mut app, KeyCode::Space);
        app.update();
        {
            let mut intent = app.world_mut().get_mut::<MovementIntent>(entity).unwrap();
            assert!(intent.jump_pressed);
            assert!(intent.take_jump_request());
        }

        app.update();
        let intent = app.world().get::<MovementIntent>(entity).unwrap();
        assert!(!intent.has_jump_request(), "held key must not request again");

        release(&mut app, KeyCode::Space);
        app.update();
        let intent = app.world().get::<MovementIntent>(entity).unwrap();
        assert!(!intent.jump_pressed);
    }

    #[test]
    fn uncontrolled_characters_are_ignored() {
        let mut app = create_test_app();
        let entity = app.world_mut().spawn(MovementIntent::new()).id();

        press(&mut app, KeyCode::Space);
        app.update();

        let intent = app.world().get::<MovementIntent>(entity).unwrap();
        assert!(!intent.jump_pressed);
    }

    #[test]
    fn control_frame_sets_control_yaw() {
        let mut app = create_test_app();
        let camera = app
            .world_mut()
            .spawn(GlobalTransform::from(Transform::from_rotation(
                Quat::from_rotation_y(FRAC_PI_2) * Quat::from_rotation_x(-0.4),
            )))
            .id();
        let entity = app
            .world_mut()
            .spawn((PlayerControlled, ControlFrame(camera)))
            .id();

        press(&mut app, KeyCode::KeyW);
        app.update();

        let intent = app.world().get::<MovementIntent>(entity).unwrap();
        assert!((intent.control_yaw - FRAC_PI_2).abs() < 1e-4);
        // Forward follows the camera's heading, ignoring its pitch.
        assert!(intent.world_direction().distance(Vec3::NEG_X) < 1e-4);
    }

    #[test]
    fn control_yaw_ignores_vertical_facing() {
        assert!(control_yaw(Quat::from_rotation_x(FRAC_PI_2)).is_none());
        assert!(control_yaw(Quat::IDENTITY).is_some_and(|yaw| yaw.abs() < 1e-6));
    }

    #[test]
    fn missing_control_frame_keeps_yaw() {
        let mut app = create_test_app();
        let mut intent = MovementIntent::new();
        intent.set_control_yaw(1.0);
        let entity = app.world_mut().spawn((PlayerControlled, intent)).id();

        press(&mut app, KeyCode::KeyW);
        app.update();

        let intent = app.world().get::<MovementIntent>(entity).unwrap();
        assert_eq!(intent.control_yaw, 1.0);
    }

    #[test]
    fn empty_jump_binding_is_detected() {
        let bindings = InputBindings {
            jump: Vec::new(),
            ..default()
        };
        assert!(!bindings.has_jump());
        assert!(InputBindings::default().has_jump());
    }

    #[test]
    fn missing_keyboard_resource_is_tolerated() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(KeyboardInputPlugin);
        app.world_mut().spawn(PlayerControlled);
        app.update();
    }
}
