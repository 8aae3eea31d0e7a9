//! The arm the camera hangs off of, and the weak handle rigs use to reach it.

use bevy_derive::Deref;
use bevy_ecs::prelude::*;
use bevy_hierarchy::Children;
use bevy_log::trace;
use bevy_math::Vec3;
use bevy_reflect::Reflect;
use bevy_transform::prelude::*;

/// A length adjustable arm with a lateral offset.
///
/// The arm is owned by whoever spawned it. Children of the arm entity (usually the camera) are
/// placed `arm_length` behind the pivot and `lateral_offset` to its right, looking down -z.
#[derive(Debug, Component, Clone, Copy, PartialEq, Reflect)]
pub struct CameraArm {
    pub arm_length: f32,
    pub lateral_offset: f32,
}

impl Default for CameraArm {
    fn default() -> Self {
        Self {
            arm_length: 300.,
            lateral_offset: 0.,
        }
    }
}

impl CameraArm {
    #[must_use]
    pub fn new(arm_length: f32) -> Self {
        Self {
            arm_length,
            ..Default::default()
        }
    }

    /// Where the end of the arm sits relative to its pivot
    #[must_use]
    #[inline]
    pub fn socket_translation(&self) -> Vec3 {
        Vec3::new(self.lateral_offset, 0., self.arm_length)
    }
}

/// A non-owning reference to an entity with a [`CameraArm`].
///
/// Entity ids are generational, so a handle to a despawned arm never resolves to a different
/// arm later on. Holding one does not keep the arm alive.
#[derive(Debug, Component, Clone, Copy, PartialEq, Eq, Hash, Deref, Reflect)]
pub struct ArmHandle(pub Entity);

/// Present while an entity needs per-frame updates.
///
/// Rigs insert and remove this on themselves and on their arm together.
#[derive(Debug, Component, Clone, Copy, Default, Reflect)]
pub struct TickEnabled;

/// Move every child of a ticking (or freshly changed) arm to the arm's socket
pub(crate) fn sync_arm_transforms(
    arms: Query<
        (Entity, &CameraArm, &Children),
        Or<(With<TickEnabled>, Changed<CameraArm>)>,
    >,
    mut transforms: Query<&mut Transform>,
) {
    for (entity, arm, children) in arms.iter() {
        let socket = arm.socket_translation();
        trace!("arm {:?} socket at {}", entity, socket);

        for child in children.iter() {
            if let Ok(mut transform) = transforms.get_mut(*child) {
                transform.translation = socket;
            }
        }
    }
}
