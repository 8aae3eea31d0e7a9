//! Preset camera distances

use bevy_ecs::prelude::*;
use bevy_log::trace;
use bevy_reflect::Reflect;

use wistchze_camera::{CameraRig, RigCommand};

/// A preset zoom level for a character's [`CameraRig`].
///
/// Changing the style (or adding it) snaps the rig's zoom to the preset.
#[derive(Debug, Component, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum CameraStyle {
    Close,
    #[default]
    Balanced,
    Far,
}

impl CameraStyle {
    /// How far into the rig's zoom range this style sits
    #[must_use]
    #[inline]
    pub fn zoom_fraction(self) -> f32 {
        match self {
            Self::Close => 1.,
            Self::Balanced => 0.5,
            Self::Far => 0.,
        }
    }

    /// Next style, going from close to far and wrapping around
    #[must_use]
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Self::Close => Self::Balanced,
            Self::Balanced => Self::Far,
            Self::Far => Self::Close,
        }
    }
}

/// Snap rigs to their style whenever it changes
pub(crate) fn apply_camera_style(
    styles: Query<(Entity, &CameraStyle), (With<CameraRig>, Changed<CameraStyle>)>,
    mut rig_commands: EventWriter<RigCommand>,
) {
    for (entity, style) in styles.iter() {
        trace!("{:?} camera style now {:?}", entity, style);
        rig_commands.send(RigCommand::zoom_fraction(entity, style.zoom_fraction()));
    }
}
