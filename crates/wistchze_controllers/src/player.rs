use bevy_ecs::prelude::*;
use bevy_input::{
    keyboard::KeyCode,
    mouse::{MouseButton, MouseScrollUnit, MouseWheel},
    Input,
};
use bevy_log::trace;
use bevy_math::Vec2;

use wistchze_camera::{CameraRig, RigCommand};

use crate::{locomotion::LocomotionInput, style::CameraStyle};

// scroll deltas in pixels are much larger than in lines
const PIXELS_PER_LINE: f32 = 16.;

/// A marker for an entity controlled as a player
#[derive(Component, Default)]
pub struct Controller();

#[derive(Bundle, Default)]
pub struct PlayerControllerBundle {
    controller: Controller,
    camera_style: CameraStyle,
}

/// Handle player inputs to do with moving the character.
pub(super) fn update_locomotion_input(
    keys: Res<Input<KeyCode>>,
    mut player: Query<&mut LocomotionInput, With<Controller>>,
) {
    let mut stick = Vec2::ZERO;
    if keys.pressed(KeyCode::W) {
        stick.y += 1.;
    }
    if keys.pressed(KeyCode::S) {
        stick.y -= 1.;
    }
    if keys.pressed(KeyCode::D) {
        stick.x += 1.;
    }
    if keys.pressed(KeyCode::A) {
        stick.x -= 1.;
    }

    let wants_sprint = keys.pressed(KeyCode::ShiftLeft);
    let wants_crouch = keys.pressed(KeyCode::ControlLeft);

    for mut input in player.iter_mut() {
        let new_input = LocomotionInput {
            // keyboard diagonals shouldn't be faster than a full stick
            stick: stick.clamp_length_max(1.),
            wants_sprint,
            wants_crouch,
        };

        if *input != new_input {
            *input = new_input;
        }
    }
}

/// Handle player inputs to do with the camera.
pub(super) fn send_camera_commands(
    keys: Res<Input<KeyCode>>,
    mouse_buttons: Res<Input<MouseButton>>,
    mut wheel_events: EventReader<MouseWheel>,
    mut players: Query<(Entity, &mut CameraStyle), (With<Controller>, With<CameraRig>)>,
    mut rig_commands: EventWriter<RigCommand>,
) {
    let scroll: f32 = wheel_events
        .iter()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
        })
        .sum();

    for (entity, mut style) in players.iter_mut() {
        if keys.just_pressed(KeyCode::Tab) {
            rig_commands.send(RigCommand::cycle_position(entity));
        }

        if keys.just_pressed(KeyCode::V) {
            *style = style.next();
        }

        if scroll != 0. {
            trace!("zoom input {}", scroll);
            rig_commands.send(RigCommand::zoom_input(entity, scroll));
        }

        // aiming snaps all the way in, letting go returns to the style's zoom
        if mouse_buttons.just_pressed(MouseButton::Right) {
            rig_commands.send(RigCommand::zoom_fraction(entity, 1.));
        } else if mouse_buttons.just_released(MouseButton::Right) {
            rig_commands.send(RigCommand::zoom_fraction(entity, style.zoom_fraction()));
        }
    }
}
