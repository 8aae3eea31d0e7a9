//! Frame-rate independent interpolation helpers.
//!
//! [`interp_to`] approaches its target exponentially: after `t` seconds at a given `speed` the
//! remaining distance is `distance * e^(-speed * t)` no matter how the time was sliced into
//! frames.

/// Distances whose square is below this are considered arrived.
pub const SMALL_NUMBER: f32 = 1.0e-8;

/// Move `current` toward `target` by the fraction of the remaining distance that an exponential
/// approach with rate `speed` covers in `delta_seconds`.
///
/// A non-positive `speed` jumps straight to `target`. Negative deltas are treated as zero.
#[must_use]
#[inline]
pub fn interp_to(current: f32, target: f32, delta_seconds: f32, speed: f32) -> f32 {
    if speed <= 0. {
        return target;
    }

    let distance = target - current;
    if distance * distance < SMALL_NUMBER {
        return target;
    }

    let alpha = 1. - (-speed * delta_seconds.max(0.)).exp();
    current + distance * alpha
}

/// Linear interpolation, `alpha` of 0 is `from` and 1 is `to`. Not clamped.
#[must_use]
#[inline]
pub fn lerp(from: f32, to: f32, alpha: f32) -> f32 {
    from + (to - from) * alpha
}

/// Inverse of [`lerp`]. Returns 0 when the range is empty.
#[must_use]
#[inline]
pub fn inverse_lerp(from: f32, to: f32, value: f32) -> f32 {
    let range = to - from;
    if range.abs() <= f32::EPSILON {
        0.
    } else {
        (value - from) / range
    }
}
