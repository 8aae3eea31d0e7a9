#![allow(clippy::unwrap_used)]

use bevy_app::prelude::*;
use bevy_core::Name;
use bevy_ecs::prelude::*;
use bevy_hierarchy::BuildWorldChildren;
use bevy_input::{
    keyboard::KeyCode,
    mouse::{MouseButton, MouseScrollUnit, MouseWheel},
    Input,
};
use bevy_math::prelude::*;

use wistchze_camera::{CameraArm, CameraRig, ShoulderPosition};
use wistchze_core::{
    goals::{Grounded, MovementGoal, ObservedVelocity},
    test_utils::DefaultTestPlugin,
};

use crate::{
    locomotion::{movement_goal, movement_input_scale, select_gait, strafe_speed_map},
    player::PlayerControllerBundle,
    AnalogStickBehavior, CameraStyle, Gait, GaitSpeeds, LocomotionBundle, LocomotionConfig,
    LocomotionInput, LocomotionState, SpeedTable,
};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn fixed_speed_keeps_only_direction() {
    let scaled = movement_input_scale(
        Vec2::new(0.3, 0.),
        AnalogStickBehavior::FixedSpeedSingleGait,
    );
    assert_eq!(scaled, Vec2::new(1., 0.));

    let scaled = movement_input_scale(Vec2::ZERO, AnalogStickBehavior::FixedSpeedWalkRun);
    assert_eq!(scaled, Vec2::ZERO);

    let raw = Vec2::new(0.2, -0.4);
    assert_eq!(
        movement_input_scale(raw, AnalogStickBehavior::VariableSpeedSingleGait),
        raw
    );
    assert_eq!(
        movement_input_scale(raw, AnalogStickBehavior::VariableSpeedWalkRun),
        raw
    );
}

#[test]
fn strafe_map_follows_angle_from_forward() {
    assert!(close(strafe_speed_map(Vec2::Y), 0.));
    assert!(close(strafe_speed_map(Vec2::X), 1.));
    assert!(close(strafe_speed_map(-Vec2::X), 1.));
    assert!(close(strafe_speed_map(-Vec2::Y), 2.));
    assert!(close(strafe_speed_map(Vec2::new(1., 1.)), 0.5));
    assert!(close(strafe_speed_map(Vec2::new(-1., -1.)), 1.5));
}

#[test]
fn gait_speeds_blend_by_direction() {
    let run = SpeedTable::default().run;

    assert!(close(run.speed_for(0.), 500.));
    assert!(close(run.speed_for(0.5), 425.));
    assert!(close(run.speed_for(1.), 350.));
    assert!(close(run.speed_for(2.), 300.));
    // out of range maps are clamped
    assert!(close(run.speed_for(7.), 300.));

    assert!(close(GaitSpeeds::uniform(700.).speed_for(1.3), 700.));
}

#[test]
fn walk_run_switches_at_threshold() {
    let config = LocomotionConfig {
        stick_behavior: AnalogStickBehavior::VariableSpeedWalkRun,
        ..Default::default()
    };
    let mut input = LocomotionInput {
        stick: Vec2::new(0., 0.5),
        ..Default::default()
    };

    assert_eq!(select_gait(&config, &input), Gait::Walk);

    input.stick = Vec2::new(0., 0.9);
    assert_eq!(select_gait(&config, &input), Gait::Run);

    input.wants_sprint = true;
    assert_eq!(select_gait(&config, &input), Gait::Sprint);

    let single = LocomotionConfig {
        gait: Gait::Walk,
        ..Default::default()
    };
    input.wants_sprint = false;
    assert_eq!(select_gait(&single, &input), Gait::Walk);
}

#[test]
fn goals_use_the_right_table() {
    let config = LocomotionConfig::default();
    let forward = LocomotionInput {
        stick: Vec2::Y,
        ..Default::default()
    };

    let goal = movement_goal(&config, &forward, Gait::Run, false);
    assert!(close(goal.z, -500.) && close(goal.x, 0.), "{goal}");

    let goal = movement_goal(&config, &forward, Gait::Sprint, true);
    assert!(close(goal.z, -225.), "crouching wins over sprinting: {goal}");

    let goal = movement_goal(&config, &LocomotionInput::default(), Gait::Run, false);
    assert_eq!(goal, Vec3::ZERO);

    let variable = LocomotionConfig {
        stick_behavior: AnalogStickBehavior::VariableSpeedSingleGait,
        ..Default::default()
    };
    let half_right = LocomotionInput {
        stick: Vec2::new(0.5, 0.),
        ..Default::default()
    };
    let goal = movement_goal(&variable, &half_right, Gait::Run, false);
    assert!(close(goal.x, 175.), "{goal}");
}

#[test]
fn camera_styles_cycle() {
    let mut style = CameraStyle::Close;
    for _ in 0..3 {
        style = style.next();
    }
    assert_eq!(style, CameraStyle::Close);
    assert!(CameraStyle::Close.zoom_fraction() > CameraStyle::Far.zoom_fraction());
}

fn controller_app() -> App {
    let mut app = App::new();

    app.add_plugins(DefaultTestPlugin);
    app.insert_resource(Input::<KeyCode>::default())
        .insert_resource(Input::<MouseButton>::default())
        .add_event::<MouseWheel>();
    app.add_plugins(crate::Plugin);

    app
}

/// A player with a rig, its arm, and locomotion. Returns (player, arm)
fn spawn_player(app: &mut App) -> (Entity, Entity) {
    let arm = app
        .world
        .spawn((Name::new("Arm"), CameraArm::new(400.)))
        .id();
    let player = app
        .world
        .spawn((
            Name::new("Player"),
            PlayerControllerBundle::default(),
            LocomotionBundle::default(),
            CameraRig::default(),
        ))
        .push_children(&[arm])
        .id();

    (player, arm)
}

fn press(app: &mut App, key: KeyCode) {
    app.world.resource_mut::<Input<KeyCode>>().press(key);
    app.update();

    let mut keys = app.world.resource_mut::<Input<KeyCode>>();
    keys.release(key);
    keys.clear();
}

#[test]
fn style_sets_zoom_on_spawn() {
    let mut app = controller_app();
    let (player, _) = spawn_player(&mut app);

    app.update();

    let rig = app.world.get::<CameraRig>(player).unwrap();
    assert!(rig.is_attached());
    assert_eq!(rig.zoom_alpha(), CameraStyle::Balanced.zoom_fraction());
}

#[test]
fn tab_cycles_shoulder() {
    let mut app = controller_app();
    let (player, _) = spawn_player(&mut app);

    app.update();
    press(&mut app, KeyCode::Tab);

    let rig = app.world.get::<CameraRig>(player).unwrap();
    assert_eq!(rig.position(), ShoulderPosition::LeftShoulder);

    app.update();
    let rig = app.world.get::<CameraRig>(player).unwrap();
    assert_eq!(rig.position(), ShoulderPosition::LeftShoulder);
}

#[test]
fn v_changes_style_and_zoom() {
    let mut app = controller_app();
    let (player, _) = spawn_player(&mut app);

    app.update();
    press(&mut app, KeyCode::V);

    assert_eq!(
        *app.world.get::<CameraStyle>(player).unwrap(),
        CameraStyle::Far
    );
    let rig = app.world.get::<CameraRig>(player).unwrap();
    assert_eq!(rig.zoom_alpha(), 0.);
    assert_eq!(rig.target_arm_length(), 400.);
}

#[test]
fn wheel_zooms_in() {
    let mut app = controller_app();
    let (player, _) = spawn_player(&mut app);

    app.update();

    app.world.send_event(MouseWheel {
        unit: MouseScrollUnit::Line,
        x: 0.,
        y: 2.,
        window: Entity::PLACEHOLDER,
    });
    app.update();

    let rig = app.world.get::<CameraRig>(player).unwrap();
    // balanced 0.5 plus 2 lines * 0.1 step * 0.5 sensitivity
    assert!(close(rig.zoom_alpha(), 0.6), "{}", rig.zoom_alpha());
}

#[test]
fn keys_become_movement_goals() {
    let mut app = controller_app();
    let (player, _) = spawn_player(&mut app);

    app.world
        .resource_mut::<Input<KeyCode>>()
        .press(KeyCode::W);
    app.update();

    let goal = app.world.get::<MovementGoal>(player).unwrap();
    assert!(close(goal.z, -500.), "{}", goal.0);

    app.world
        .resource_mut::<Input<KeyCode>>()
        .press(KeyCode::ShiftLeft);
    app.update();

    let state = app.world.get::<LocomotionState>(player).unwrap();
    assert_eq!(state.gait, Gait::Sprint);
    let goal = app.world.get::<MovementGoal>(player).unwrap();
    assert!(close(goal.z, -700.), "{}", goal.0);
}

#[test]
fn landing_is_seen_for_one_frame() {
    let mut app = controller_app();

    let falling = Vec3::new(0., -5., 0.);
    let character = app
        .world
        .spawn((
            LocomotionBundle::default(),
            Grounded(false),
            ObservedVelocity(falling),
        ))
        .id();

    app.update();
    assert!(!app.world.get::<LocomotionState>(character).unwrap().just_landed);

    app.world.get_mut::<Grounded>(character).unwrap().0 = true;
    app.world.get_mut::<ObservedVelocity>(character).unwrap().0 = Vec3::ZERO;
    app.update();

    let state = *app.world.get::<LocomotionState>(character).unwrap();
    assert!(state.just_landed);
    assert_eq!(state.land_velocity, falling);
    assert_eq!(state.last_velocity, Vec3::ZERO);

    app.update();
    assert!(!app.world.get::<LocomotionState>(character).unwrap().just_landed);
}
