//! The camera rig state machine.
//!
//! A [`CameraRig`] keeps two interpolations on its [`CameraArm`] running: sliding the arm sideways
//! to the selected shoulder and changing the arm's length to zoom. Each one is a [`RigFeature`]
//! that is switched on by a command and switched off again once it has converged, so a rig with
//! nothing to do costs nothing per frame.

use bevy_ecs::prelude::*;
use bevy_log::{debug, trace, warn};
use bevy_reflect::Reflect;
use thiserror::Error;

use wistchze_core::interp::{interp_to, inverse_lerp, lerp};

use crate::{
    arm::{ArmHandle, CameraArm},
    config::RigConfig,
    features::{ActiveFeatures, RigFeature},
    position::ShoulderPosition,
};

/// Everything that can go wrong when driving a rig
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RigError {
    #[error("camera rig used before being attached to an arm")]
    NotAttached,
    #[error("camera rig on {rig:?} has no camera arm to attach to")]
    MissingArm { rig: Entity },
    #[error("camera arm {arm:?} no longer exists")]
    ArmDestroyed { arm: Entity },
    #[error("rig setting `{field}` is out of range: {value}")]
    ConfigurationOutOfRange { field: &'static str, value: f32 },
}

/// Smoothly repositions and zooms a third person camera arm.
///
/// Built from a [`RigConfig`], then [`CameraRig::attach`]ed to the arm it drives. The plugin does
/// the attaching for newly spawned rigs.
#[derive(Debug, Component, Clone, Reflect)]
pub struct CameraRig {
    config: RigConfig,
    position: ShoulderPosition,
    zoom_alpha: f32,
    zoom_out_length: f32,
    zoom_in_length: f32,
    target_arm_length: f32,
    features: ActiveFeatures,
    arm: Option<ArmHandle>,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(RigConfig::default())
    }
}

impl CameraRig {
    /// Create an unattached rig. Out of range settings are clamped (with a warning).
    #[must_use]
    pub fn new(config: RigConfig) -> Self {
        let config = config.clamped();

        Self {
            config,
            position: config.initial_position,
            zoom_alpha: 0.,
            zoom_out_length: 0.,
            zoom_in_length: 0.,
            target_arm_length: 0.,
            features: ActiveFeatures::NONE,
            arm: None,
        }
    }

    /// Like [`CameraRig::new`], but refuses bad settings instead of fixing them.
    ///
    /// # Errors
    /// [`RigError::ConfigurationOutOfRange`] naming the first bad setting
    pub fn try_new(config: RigConfig) -> Result<Self, RigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    #[must_use]
    #[inline]
    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    #[must_use]
    #[inline]
    pub fn position(&self) -> ShoulderPosition {
        self.position
    }

    #[must_use]
    #[inline]
    pub fn zoom_alpha(&self) -> f32 {
        self.zoom_alpha
    }

    #[must_use]
    #[inline]
    pub fn zoom_out_length(&self) -> f32 {
        self.zoom_out_length
    }

    #[must_use]
    #[inline]
    pub fn zoom_in_length(&self) -> f32 {
        self.zoom_in_length
    }

    #[must_use]
    #[inline]
    pub fn target_arm_length(&self) -> f32 {
        self.target_arm_length
    }

    /// Signed lateral offset the arm is heading for
    #[must_use]
    #[inline]
    pub fn target_offset(&self) -> f32 {
        self.position.offset(self.config.shoulder_offset)
    }

    #[must_use]
    #[inline]
    pub fn features(&self) -> ActiveFeatures {
        self.features
    }

    /// The arm this rig drives, if attached
    #[must_use]
    #[inline]
    pub fn arm(&self) -> Option<ArmHandle> {
        self.arm
    }

    #[must_use]
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.arm.is_some()
    }

    /// Take over `arm`.
    ///
    /// The arm's current length becomes the fully zoomed out length, and the arm is snapped to the
    /// selected shoulder. Attaching again recaptures the lengths from the arm as it is now.
    pub fn attach(&mut self, handle: ArmHandle, arm: &mut CameraArm) {
        self.zoom_out_length = arm.arm_length;
        self.target_arm_length = arm.arm_length;
        self.zoom_in_length = self.zoom_out_length * (1. - self.config.max_zoom_in);
        self.zoom_alpha = 0.;

        arm.lateral_offset = self.target_offset();

        self.features.clear();
        self.arm = Some(handle);

        debug!(
            "rig attached to {:?}: zoom range {}..{}, offset {}",
            *handle, self.zoom_in_length, self.zoom_out_length, arm.lateral_offset
        );
    }

    /// Forget the arm and stop every running interpolation
    pub fn detach(&mut self) {
        self.arm = None;
        self.features.clear();
    }

    fn ensure_attached(&self) -> Result<(), RigError> {
        if self.is_attached() {
            Ok(())
        } else {
            Err(RigError::NotAttached)
        }
    }

    /// Move on to the next shoulder and start sliding toward it.
    ///
    /// # Errors
    /// [`RigError::NotAttached`] before [`CameraRig::attach`]
    pub fn cycle_position(&mut self) -> Result<(), RigError> {
        self.ensure_attached()?;

        self.position = self.position.next();
        self.features.activate(RigFeature::Positioning);

        trace!("rig shoulder now {:?}", self.position);
        Ok(())
    }

    /// Accumulate analog zoom input, positive zooms in. Saturates at the configured bounds.
    ///
    /// # Errors
    /// [`RigError::NotAttached`] before [`CameraRig::attach`]
    pub fn apply_zoom_input(&mut self, input: f32) -> Result<(), RigError> {
        self.ensure_attached()?;

        if !input.is_finite() {
            warn!("ignoring non-finite zoom input {}", input);
            return Ok(());
        }

        let alpha = self.zoom_alpha + input * self.config.zoom_step * self.config.zoom_sensitivity;
        self.set_zoom_alpha(alpha);
        Ok(())
    }

    /// Jump the zoom target to `fraction` of the allowed zoom range in one go.
    ///
    /// # Errors
    /// [`RigError::NotAttached`] before [`CameraRig::attach`]
    pub fn set_zoom_by_fraction(&mut self, fraction: f32) -> Result<(), RigError> {
        self.ensure_attached()?;

        if fraction.is_nan() {
            warn!("ignoring NaN zoom fraction");
            return Ok(());
        }

        self.set_zoom_alpha(fraction);
        Ok(())
    }

    /// `zoom_alpha` is the fraction of the zoomed-out arm length removed, capped at `max_zoom_in`
    fn set_zoom_alpha(&mut self, alpha: f32) {
        self.zoom_alpha = alpha.clamp(0., self.config.max_zoom_in);
        // alpha only ever reaches max_zoom_in, which has to land on zoom_in_length
        let progress = inverse_lerp(0., self.config.max_zoom_in, self.zoom_alpha);
        self.target_arm_length = lerp(self.zoom_out_length, self.zoom_in_length, progress);
        self.features.activate(RigFeature::Zooming);

        trace!(
            "rig zoom alpha {} -> arm length {}",
            self.zoom_alpha,
            self.target_arm_length
        );
    }

    /// Advance every running interpolation by `delta_seconds`, returning what is still running.
    ///
    /// Does not touch `arm` at all when nothing is running.
    pub fn step(&mut self, delta_seconds: f32, arm: &mut CameraArm) -> ActiveFeatures {
        if self.features.contains(RigFeature::Positioning) {
            let target = self.target_offset();
            arm.lateral_offset = interp_to(
                arm.lateral_offset,
                target,
                delta_seconds,
                self.config.positioning_speed,
            );

            if (target - arm.lateral_offset).abs() < self.config.convergence_tolerance {
                self.features.deactivate(RigFeature::Positioning);
                trace!("rig positioning converged at {}", arm.lateral_offset);
            }
        }

        if self.features.contains(RigFeature::Zooming) {
            arm.arm_length = interp_to(
                arm.arm_length,
                self.target_arm_length,
                delta_seconds,
                self.config.zooming_speed,
            );

            if (self.target_arm_length - arm.arm_length).abs() < self.config.convergence_tolerance {
                self.features.deactivate(RigFeature::Zooming);
                trace!("rig zooming converged at {}", arm.arm_length);
            }
        }

        self.features
    }
}
