//! Discrete shoulder placement of the camera

use bevy_reflect::Reflect;

/// Which side of the pivot the camera sits on.
///
/// Cycles `LeftShoulder -> Center -> RightShoulder -> LeftShoulder`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum ShoulderPosition {
    LeftShoulder,
    Center,
    #[default]
    RightShoulder,
}

impl ShoulderPosition {
    pub const ALL: [Self; 3] = [Self::LeftShoulder, Self::Center, Self::RightShoulder];

    /// The next position in the cycle, wrapping from right back to left
    #[must_use]
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Self::LeftShoulder => Self::Center,
            Self::Center => Self::RightShoulder,
            Self::RightShoulder => Self::LeftShoulder,
        }
    }

    /// -1 for left, 0 for center, 1 for right
    #[must_use]
    #[inline]
    pub fn direction(self) -> f32 {
        match self {
            Self::LeftShoulder => -1.,
            Self::Center => 0.,
            Self::RightShoulder => 1.,
        }
    }

    /// Signed lateral offset of this position for a given shoulder distance
    #[must_use]
    #[inline]
    pub fn offset(self, shoulder_offset: f32) -> f32 {
        self.direction() * shoulder_offset
    }
}
