//! Which interpolations of a rig are still converging.

use bevy_reflect::Reflect;

/// A single interpolation a [`crate::CameraRig`] can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum RigFeature {
    /// Sliding the arm's lateral offset toward the current shoulder
    Positioning,
    /// Moving the arm's length toward the zoom target
    Zooming,
}

impl RigFeature {
    pub const ALL: [Self; 2] = [Self::Positioning, Self::Zooming];

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Self::Positioning => 1 << 0,
            Self::Zooming => 1 << 1,
        }
    }
}

/// The set of [`RigFeature`]s currently running.
///
/// Empty means nothing is converging, and the owning rig should not be ticked at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub struct ActiveFeatures(u8);

impl ActiveFeatures {
    pub const NONE: Self = Self(0);

    /// Returns true if `feature` was not already active
    #[inline]
    pub fn activate(&mut self, feature: RigFeature) -> bool {
        let was_active = self.contains(feature);
        self.0 |= feature.bit();
        !was_active
    }

    /// Returns true if `feature` was active
    #[inline]
    pub fn deactivate(&mut self, feature: RigFeature) -> bool {
        let was_active = self.contains(feature);
        self.0 &= !feature.bit();
        was_active
    }

    #[must_use]
    #[inline]
    pub fn contains(self, feature: RigFeature) -> bool {
        self.0 & feature.bit() != 0
    }

    #[must_use]
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Iterate the active features in declaration order
    pub fn iter(self) -> impl Iterator<Item = RigFeature> {
        RigFeature::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl FromIterator<RigFeature> for ActiveFeatures {
    fn from_iter<T: IntoIterator<Item = RigFeature>>(iter: T) -> Self {
        let mut features = Self::NONE;
        for feature in iter {
            features.activate(feature);
        }
        features
    }
}
