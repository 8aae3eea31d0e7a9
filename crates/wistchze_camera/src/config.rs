//! Tunables for a [`crate::CameraRig`]

use bevy_log::warn;
use bevy_reflect::Reflect;

use crate::{position::ShoulderPosition, RigError};

/// Settings a rig is created with.
///
/// Editable at runtime through the inspector; values are checked once when the rig is built.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct RigConfig {
    /// Lateral distance from the center of the arm to either shoulder
    pub shoulder_offset: f32,
    /// Where the camera starts out
    pub initial_position: ShoulderPosition,
    /// Fraction of the arm length zooming in is allowed to take away. Within `[0, 1]`
    pub max_zoom_in: f32,
    pub zoom_sensitivity: f32,
    /// Scale applied to every unit of zoom input before sensitivity
    pub zoom_step: f32,
    /// Rate of the exponential approach when changing shoulders
    pub positioning_speed: f32,
    /// Rate of the exponential approach when zooming
    pub zooming_speed: f32,
    /// Once an interpolation is closer than this to its target it stops running
    pub convergence_tolerance: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            shoulder_offset: 100.,
            initial_position: ShoulderPosition::RightShoulder,
            max_zoom_in: 0.75,
            zoom_sensitivity: 0.5,
            zoom_step: 0.1,
            positioning_speed: 3.,
            zooming_speed: 2.,
            convergence_tolerance: 0.25,
        }
    }
}

impl RigConfig {
    /// Check that every value is usable as is.
    ///
    /// # Errors
    /// Reports the first field that is out of range or not finite.
    pub fn validate(&self) -> Result<(), RigError> {
        let out_of_range = |field: &'static str, value: f32| {
            Err(RigError::ConfigurationOutOfRange { field, value })
        };

        if !(0. ..=1.).contains(&self.max_zoom_in) {
            return out_of_range("max_zoom_in", self.max_zoom_in);
        }
        if !self.shoulder_offset.is_finite() {
            return out_of_range("shoulder_offset", self.shoulder_offset);
        }
        if !self.zoom_sensitivity.is_finite() {
            return out_of_range("zoom_sensitivity", self.zoom_sensitivity);
        }
        if !self.zoom_step.is_finite() {
            return out_of_range("zoom_step", self.zoom_step);
        }
        if !self.positioning_speed.is_finite() {
            return out_of_range("positioning_speed", self.positioning_speed);
        }
        if !self.zooming_speed.is_finite() {
            return out_of_range("zooming_speed", self.zooming_speed);
        }
        if !(self.convergence_tolerance.is_finite() && self.convergence_tolerance > 0.) {
            return out_of_range("convergence_tolerance", self.convergence_tolerance);
        }

        Ok(())
    }

    /// A copy with every out of range value pulled back to something usable.
    ///
    /// Logs a warning for each value that had to change.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        let defaults = Self::default();

        let fix = |field: &'static str, value: &mut f32, fixed: f32| {
            if *value != fixed {
                warn!("rig config `{}` out of range ({}), using {}", field, value, fixed);
                *value = fixed;
            }
        };

        let max_zoom_in = if self.max_zoom_in.is_nan() {
            defaults.max_zoom_in
        } else {
            self.max_zoom_in.clamp(0., 1.)
        };
        fix("max_zoom_in", &mut self.max_zoom_in, max_zoom_in);

        for (field, value, default) in [
            (
                "shoulder_offset",
                &mut self.shoulder_offset,
                defaults.shoulder_offset,
            ),
            (
                "zoom_sensitivity",
                &mut self.zoom_sensitivity,
                defaults.zoom_sensitivity,
            ),
            ("zoom_step", &mut self.zoom_step, defaults.zoom_step),
            (
                "positioning_speed",
                &mut self.positioning_speed,
                defaults.positioning_speed,
            ),
            (
                "zooming_speed",
                &mut self.zooming_speed,
                defaults.zooming_speed,
            ),
        ] {
            if !value.is_finite() {
                fix(field, value, default);
            }
        }

        if !(self.convergence_tolerance.is_finite() && self.convergence_tolerance > 0.) {
            fix(
                "convergence_tolerance",
                &mut self.convergence_tolerance,
                defaults.convergence_tolerance,
            );
        }

        self
    }
}
