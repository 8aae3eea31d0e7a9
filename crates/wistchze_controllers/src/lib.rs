//! Controllers for player characters
//!
//! The final output of controllers will be "requests": [`wistchze_core::goals::MovementGoal`]s
//! for whatever moves the character, and [`wistchze_camera::RigCommand`]s for its camera.

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

use bevy_app::{App, Startup, Update};
use bevy_ecs::prelude::*;
use bevy_reflect::GetTypeRegistration;

use wistchze_camera::{CameraPlugin, RigSystem};
use wistchze_core::GameplaySet;

pub mod locomotion;
pub mod player;
pub mod style;

pub use locomotion::{
    AnalogStickBehavior, Gait, GaitSpeeds, LocomotionBundle, LocomotionConfig, LocomotionInput,
    LocomotionState, SpeedTable,
};
pub use style::CameraStyle;

#[cfg(test)]
mod test;

fn register_types(type_registry: Res<AppTypeRegistry>) {
    let mut type_registry_w = type_registry.write();

    type_registry_w.add_registration(LocomotionConfig::get_type_registration());
    type_registry_w.add_registration(LocomotionInput::get_type_registration());
    type_registry_w.add_registration(LocomotionState::get_type_registration());
    type_registry_w.add_registration(AnalogStickBehavior::get_type_registration());
    type_registry_w.add_registration(Gait::get_type_registration());
    type_registry_w.add_registration(GaitSpeeds::get_type_registration());
    type_registry_w.add_registration(SpeedTable::get_type_registration());
    type_registry_w.add_registration(CameraStyle::get_type_registration());
}

/// Locomotion and camera style for any character, plus reading player input.
///
/// Player input needs the `bevy_input` resources (`Input<KeyCode>`, `Input<MouseButton>` and
/// `MouseWheel` events) to exist.
pub struct Plugin;
impl bevy_app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<CameraPlugin>() {
            app.add_plugins(CameraPlugin);
        }

        app.add_systems(Startup, register_types).add_systems(
            Update,
            (
                (
                    player::update_locomotion_input,
                    player::send_camera_commands,
                    style::apply_camera_style,
                )
                    .chain()
                    .in_set(GameplaySet::Input)
                    .before(RigSystem::ApplyCommands),
                (locomotion::track_landing, locomotion::update_locomotion)
                    .chain()
                    .in_set(GameplaySet::Simulate),
            ),
        );
    }
}
