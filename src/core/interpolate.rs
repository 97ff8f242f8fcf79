//! Easing and numeric tweening used by every transition.

use serde::{Deserialize, Serialize};

/// Easing curve applied to linear time progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Symmetric cubic ease-in-out (slow start, slow end).
    #[default]
    CubicInOut,
    /// No reshaping.
    Linear,
}

impl Easing {
    /// Maps linear progress to eased progress. Input is clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, progress: f64) -> f64 {
        match self {
            Self::CubicInOut => ease_in_out_cubic(progress),
            Self::Linear => clamp_progress(progress),
        }
    }
}

/// Clamps progress into `[0, 1]`; `NaN` maps to `0`.
#[must_use]
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

/// `4t³` below the midpoint, `1 - 4(1-t)³` above it.
#[must_use]
pub fn ease_in_out_cubic(progress: f64) -> f64 {
    let t = clamp_progress(progress);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let rest = 1.0 - t;
        1.0 - 4.0 * rest * rest * rest
    }
}

/// Linear blend between `from` and `to` at eased progress.
///
/// The endpoints are returned verbatim so a settled transition reproduces the
/// target value bit for bit.
#[must_use]
pub fn lerp(from: f64, to: f64, eased: f64) -> f64 {
    if eased <= 0.0 {
        return from;
    }
    if eased >= 1.0 {
        return to;
    }
    let delta = to - from;
    if delta.is_finite() {
        from + delta * eased
    } else {
        from * (1.0 - eased) + to * eased
    }
}
