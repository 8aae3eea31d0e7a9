//! Goals and observations for communicating between controllers and the host simulation
//!
//! For example, [`MovementGoal`] communicates to whatever moves the character where a controller
//! would like to go, while [`Grounded`] and [`ObservedVelocity`] are written by the host and read
//! by controllers.

use bevy_derive::{Deref, DerefMut};
use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use bevy_reflect::{GetTypeRegistration, Reflect};

/// A way to request movement for a specific entity, in units per second.
///
/// Expressed in the entity's local frame: x is right, y is up, and forward is -z.
///
/// Controllers don't check whether a goal is reachable, they only express it.
#[derive(Debug, Component, Clone, Copy, Default, Deref, DerefMut, Reflect)]
pub struct MovementGoal(pub Vec3);

/// Whether the host considers the entity to be standing on something this frame
#[derive(Debug, Component, Clone, Copy, Default, Deref, DerefMut, Reflect, PartialEq, Eq)]
pub struct Grounded(pub bool);

/// The velocity the host actually moved the entity at during the last frame
#[derive(Debug, Component, Clone, Copy, Default, Deref, DerefMut, Reflect)]
pub struct ObservedVelocity(pub Vec3);

pub(crate) fn register_types(type_registry: Res<AppTypeRegistry>) {
    let mut type_registry_w = type_registry.write();

    type_registry_w.add_registration(MovementGoal::get_type_registration());
    type_registry_w.add_registration(Grounded::get_type_registration());
    type_registry_w.add_registration(ObservedVelocity::get_type_registration());
}
