#![warn(clippy::unwrap_used)]
#![warn(clippy::perf, clippy::disallowed_types)] // performance warns
#![warn(clippy::pedantic)]
// most bevy systems violate these. Nothing I can do about it at the moment.
#![allow(
    clippy::type_complexity,
    clippy::too_many_arguments,
    clippy::needless_pass_by_value // TODO: separate out system functions from non-system
)]
#![allow(clippy::cast_possible_truncation)]

use bevy::prelude::*;
use wistchze_camera::{CameraArm, CameraPlugin, CameraRig, RigConfig};
use wistchze_controllers::{player::PlayerControllerBundle, LocomotionBundle};
use wistchze_core::{
    goals::{Grounded, MovementGoal, ObservedVelocity},
    CorePlugin, GameplaySet,
};

#[cfg(feature = "developer-tools")]
use wistchze_core::{bevy_egui::EguiPlugin, bevy_inspector_egui::quick::WorldInspectorPlugin};

// locomotion speeds are in centimeters per second, the scene is in meters
const CENTIMETERS: f32 = 0.01;

/// the bundle for spawning a player character
#[derive(Bundle)]
struct PlayerBundle {
    pbr: PbrBundle,
    name: Name,
    player_controller_bundle: PlayerControllerBundle,
    locomotion: LocomotionBundle,
    rig: CameraRig,
    grounded: Grounded,
    velocity: ObservedVelocity,
}

#[cfg(feature = "developer-tools")]
fn quit_on_escape(mut exit: EventWriter<bevy::app::AppExit>, keys: Res<Input<KeyCode>>) {
    if keys.pressed(KeyCode::Escape) {
        exit.send_default();
    }
}

/// Nothing in the demo does physics, so goals are applied as is on flat ground
fn move_characters(
    mut characters: Query<(&mut Transform, &MovementGoal, Option<&mut ObservedVelocity>)>,
    time: Res<Time>,
) {
    let delta_seconds = time.delta_seconds();

    for (mut transform, goal, velocity) in characters.iter_mut() {
        let world_velocity = transform.rotation * **goal * CENTIMETERS;

        if world_velocity != Vec3::ZERO {
            transform.translation += world_velocity * delta_seconds;
        }
        if let Some(mut velocity) = velocity {
            velocity.0 = world_velocity;
        }
    }
}

pub fn run_game() {
    let mut app = App::new();

    // bevy plugins
    app.add_plugins(DefaultPlugins);

    #[cfg(feature = "fps-diagnostics")]
    app.add_plugins((
        bevy::diagnostic::FrameTimeDiagnosticsPlugin,
        bevy::diagnostic::LogDiagnosticsPlugin::default(),
    ));

    // world inspector & egui plugins
    #[cfg(feature = "developer-tools")]
    app.add_plugins(EguiPlugin);

    #[cfg(feature = "developer-tools")]
    app.add_plugins(WorldInspectorPlugin::new());

    // our plugins
    app.add_plugins((CorePlugin, CameraPlugin, wistchze_controllers::Plugin));

    trace!("setting up resources, adding startup systems");
    app.insert_resource(ClearColor(Color::rgb(0.55, 0.7, 0.85)))
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            move_characters
                .in_set(GameplaySet::Simulate)
                .after(wistchze_controllers::locomotion::update_locomotion),
        );

    #[cfg(feature = "developer-tools")]
    app.add_systems(Update, quit_on_escape);

    trace!("Running app");
    app.run();
}

/// spawns a floor, some landmarks to judge camera movement by, and the player
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(4., 8., 4.).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(shape::Plane::from_size(60.).into()),
            material: materials.add(Color::rgb(0.35, 0.5, 0.3).into()),
            ..default()
        },
        Name::new("Floor"),
    ));

    let pillar_mesh = meshes.add(shape::Box::new(1., 3., 1.).into());
    let pillar_material = materials.add(Color::rgb(0.6, 0.55, 0.5).into());
    for (x, z) in [(-6., -8.), (5., -12.), (-3., -20.), (8., -4.), (0., 6.)] {
        commands.spawn((
            PbrBundle {
                mesh: pillar_mesh.clone(),
                material: pillar_material.clone(),
                transform: Transform::from_xyz(x, 1.5, z),
                ..default()
            },
            Name::new("Pillar"),
        ));
    }

    // camera hangs off an arm pivoting just above the player's head
    let camera = commands
        .spawn((Camera3dBundle::default(), Name::new("Camera")))
        .id();
    let arm = commands
        .spawn((
            SpatialBundle::from_transform(
                Transform::from_xyz(0., 1.6, 0.).with_rotation(Quat::from_rotation_x(-0.3)),
            ),
            CameraArm::new(4.),
            Name::new("Camera Arm"),
        ))
        .push_children(&[camera])
        .id();

    // the scene is in meters, so the rig is tuned to match
    let rig = CameraRig::new(RigConfig {
        shoulder_offset: 0.7,
        convergence_tolerance: 0.005,
        ..default()
    });

    commands
        .spawn(PlayerBundle {
            pbr: PbrBundle {
                mesh: meshes.add(shape::Capsule::default().into()),
                material: materials.add(Color::rgb(0.8, 0.3, 0.25).into()),
                transform: Transform::from_xyz(0., 1., 0.),
                ..default()
            },
            name: Name::new("Player"),
            player_controller_bundle: default(),
            locomotion: default(),
            rig,
            grounded: Grounded(true),
            velocity: default(),
        })
        .push_children(&[arm]);
}
