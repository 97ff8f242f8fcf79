use crate::core::{Datum, Easing, Snapshot};

/// Duration of an animated data replacement.
pub const DEFAULT_TRANSITION_DURATION_MS: f64 = 1200.0;

/// Animated interpolation between two snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T> {
    pub from: Snapshot<T>,
    pub to: Snapshot<T>,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl<T: Datum> Transition<T> {
    /// Creates a transition; `start_ms` is stamped by the scheduler on start.
    #[must_use]
    pub fn new(from: Snapshot<T>, to: Snapshot<T>, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms: 0.0,
            duration_ms,
            easing,
        }
    }

    #[must_use]
    pub fn started_at(mut self, start_ms: f64) -> Self {
        self.start_ms = start_ms;
        self
    }

    /// Linear time progress, `min(elapsed / duration, 1)`.
    #[must_use]
    pub fn progress_at(&self, now_ms: f64) -> f64 {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return 1.0;
        }
        let elapsed = now_ms - self.start_ms;
        if elapsed.is_nan() {
            return 0.0;
        }
        (elapsed / self.duration_ms).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn snapshot_at(&self, eased: f64) -> Snapshot<T> {
        Snapshot::interpolate(&self.from, &self.to, eased)
    }
}
