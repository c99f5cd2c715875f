//! Integration tests for the character controller with the Avian3D backend.
//!
//! These run the real physics simulation, so assertions leave room for
//! gravity and solver effects within a step.

#![cfg(feature = "avian3d")]

use std::time::Duration;

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use third_person_character::prelude::*;

const STEP: Duration = Duration::from_nanos(16_666_667);
// World units are centimeters.
const LENGTH_UNIT: f32 = 100.0;
const GRAVITY: f32 = 980.0;

const CAPSULE_RADIUS: f32 = 42.0;
const CAPSULE_HALF_HEIGHT: f32 = 96.0;

fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins);
    app.add_plugins(TransformPlugin);
    app.add_plugins(AssetPlugin::default());
    app.init_asset::<Mesh>();
    // Insert SceneSpawner resource to satisfy Avian's ColliderHierarchyPlugin
    app.insert_resource(bevy::scene::SceneSpawner::default());
    // Character controller runs in FixedUpdate, physics runs in FixedPostUpdate
    app.add_plugins(PhysicsPlugins::default().with_length_unit(LENGTH_UNIT));
    app.add_plugins(CharacterControllerPlugin::<Avian3dBackend>::default());
    app.insert_resource(Gravity(Vec3::NEG_Y * GRAVITY));
    app.insert_resource(Time::<Fixed>::from_duration(STEP));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));

    app.finish();
    app.cleanup();
    app.update();
    app
}

/// Spawn a static floor whose top face is at y = 0.
fn spawn_ground(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_xyz(0.0, -10.0, 0.0),
            RigidBody::Static,
            Collider::cuboid(4000.0, 20.0, 4000.0),
        ))
        .id()
}

/// Spawn a tall wall whose face toward the origin is at `x = face_x`.
fn spawn_wall(app: &mut App, face_x: f32, body: RigidBody) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_xyz(face_x + 10.0, 500.0, 0.0),
            body,
            GravityScale(0.0),
            Collider::cuboid(20.0, 2000.0, 400.0),
        ))
        .id()
}

fn spawn_character(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            CharacterController::new(),
            ControllerConfig::default(),
            MovementIntent::new(),
            Avian3dBackend::capsule_body(CAPSULE_RADIUS, CAPSULE_HALF_HEIGHT),
        ))
        .id()
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn request_jump(app: &mut App, entity: Entity) {
    app.world_mut()
        .get_mut::<MovementIntent>(entity)
        .unwrap()
        .request_jump();
}

fn controller(app: &App, entity: Entity) -> &CharacterController {
    app.world().get::<CharacterController>(entity).unwrap()
}

fn velocity(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<LinearVelocity>(entity).unwrap().0
}

fn jump_state(app: &App, entity: Entity) -> JumpState {
    *app.world().get::<JumpState>(entity).unwrap()
}

// ==================== Ground detection ====================

#[test]
fn character_settles_on_ground() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let character = spawn_character(&mut app, Vec3::new(0.0, CAPSULE_HALF_HEIGHT + 1.0, 0.0));

    run_frames(&mut app, 60);

    let controller = controller(&app, character);
    assert!(controller.is_grounded, "character should rest on the floor");
    assert!((controller.collider_bottom_offset - CAPSULE_HALF_HEIGHT).abs() < 0.5);
    let normal = controller.ground_normal().unwrap();
    assert!(normal.distance(Vec3::Y) < 0.01, "normal {normal:?}");
}

#[test]
fn character_high_above_ground_is_falling() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let character = spawn_character(&mut app, Vec3::new(0.0, 1000.0, 0.0));

    run_frames(&mut app, 5);

    assert!(controller(&app, character).is_falling());
    assert!(velocity(&app, character).y < 0.0);
}

// ==================== Jumping ====================

#[test]
fn grounded_jump_leaves_the_ground() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let character = spawn_character(&mut app, Vec3::new(0.0, CAPSULE_HALF_HEIGHT + 1.0, 0.0));
    run_frames(&mut app, 60);
    assert!(controller(&app, character).is_grounded);

    request_jump(&mut app, character);
    run_frames(&mut app, 1);
    assert!(velocity(&app, character).y > 600.0);

    run_frames(&mut app, 10);
    assert!(controller(&app, character).is_falling());
    assert!(jump_state(&app, character).can_double_jump);
}

#[test]
fn double_jump_in_the_air() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let character = spawn_character(&mut app, Vec3::new(0.0, 1000.0, 0.0));
    run_frames(&mut app, 10);
    assert!(velocity(&app, character).y < 0.0);

    request_jump(&mut app, character);
    run_frames(&mut app, 1);

    assert!(velocity(&app, character).y > 600.0);
    assert!(!jump_state(&app, character).can_double_jump);
}

#[test]
fn landing_rearms_double_jump() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let character = spawn_character(&mut app, Vec3::new(0.0, 300.0, 0.0));
    run_frames(&mut app, 2);

    request_jump(&mut app, character);
    run_frames(&mut app, 1);
    assert!(!jump_state(&app, character).can_double_jump);

    // 700 cm/s up under 980 cm/s^2 is back on the floor well within 3 s.
    run_frames(&mut app, 180);
    assert!(controller(&app, character).is_grounded);
    assert!(jump_state(&app, character).can_double_jump);
}

// ==================== Wall jumping ====================

#[test]
fn wall_jump_pushes_away_from_static_wall() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    // Right probe reaches 45 cm, inside the 50 cm detection range.
    spawn_wall(&mut app, 45.0, RigidBody::Static);
    let character = spawn_character(&mut app, Vec3::new(0.0, 600.0, 0.0));
    run_frames(&mut app, 2);

    request_jump(&mut app, character);
    run_frames(&mut app, 1);

    let v = velocity(&app, character);
    assert!(v.x < -400.0, "pushed away from the wall, got {v:?}");
    assert!(v.y > 600.0, "launched upward, got {v:?}");
    assert!(!jump_state(&app, character).can_wall_jump);
    assert!(jump_state(&app, character).can_double_jump);

    run_frames(&mut app, 12);
    assert!(jump_state(&app, character).can_wall_jump, "cooldown re-arms");
}

#[test]
fn dynamic_bodies_are_not_wall_jumpable() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    spawn_wall(&mut app, 45.0, RigidBody::Dynamic);
    let character = spawn_character(&mut app, Vec3::new(0.0, 600.0, 0.0));
    run_frames(&mut app, 2);

    request_jump(&mut app, character);
    run_frames(&mut app, 1);

    let state = jump_state(&app, character);
    assert!(state.can_wall_jump);
    assert!(!state.can_double_jump, "falls back to the double jump");
}

// ==================== Walking ====================

#[test]
fn walking_moves_along_input() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let character = spawn_character(&mut app, Vec3::new(0.0, CAPSULE_HALF_HEIGHT + 1.0, 0.0));
    run_frames(&mut app, 30);

    app.world_mut()
        .get_mut::<MovementIntent>(character)
        .unwrap()
        .set_move(Vec2::new(0.0, 1.0));
    run_frames(&mut app, 60);

    let v = velocity(&app, character);
    assert!(v.z < -400.0, "walking forward along -Z, got {v:?}");
    let z = app.world().get::<Position>(character).unwrap().0.z;
    assert!(z < -100.0);
}
