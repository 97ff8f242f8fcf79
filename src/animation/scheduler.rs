use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Datum, Snapshot};

use super::{FrameHandle, FrameHost, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Result of one accepted frame callback.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTick<T> {
    /// Linear time progress in `[0, 1]`.
    pub progress: f64,
    /// Progress after easing; this is what mappers receive.
    pub eased: f64,
    pub snapshot: Snapshot<T>,
    pub finished: bool,
    pub generation: u64,
}

#[derive(Debug)]
struct ActiveTransition<T> {
    transition: Transition<T>,
    pending: Option<FrameHandle>,
    last_progress: f64,
    generation: u64,
}

/// Drives at most one transition per chart instance.
///
/// A frame callback is accepted only when its handle equals the one the
/// scheduler is currently waiting for. Starting a new transition or
/// cancelling clears that handle before anything else is requested, so a
/// superseded callback that still fires is ignored.
#[derive(Debug)]
pub struct FrameScheduler<T> {
    active: Option<ActiveTransition<T>>,
    generation: u64,
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self {
            active: None,
            generation: 0,
        }
    }
}

impl<T: Datum> FrameScheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SchedulerState {
        if self.active.is_some() {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Number of transitions started so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.active.as_ref().and_then(|active| active.pending)
    }

    #[must_use]
    pub fn transition(&self) -> Option<&Transition<T>> {
        self.active.as_ref().map(|active| &active.transition)
    }

    /// Starts `transition`, superseding any running one.
    pub fn start<H: FrameHost>(&mut self, transition: Transition<T>, host: &mut H) {
        self.cancel(host);

        let transition = transition.started_at(host.now_ms());
        self.generation += 1;
        debug!(
            generation = self.generation,
            duration_ms = transition.duration_ms,
            points = transition.to.len(),
            "start transition"
        );
        let pending = host.request_frame();
        self.active = Some(ActiveTransition {
            transition,
            pending: Some(pending),
            last_progress: 0.0,
            generation: self.generation,
        });
    }

    /// Cancels the running transition. Returns `false` when already idle.
    pub fn cancel<H: FrameHost>(&mut self, host: &mut H) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        if let Some(handle) = active.pending {
            host.cancel_frame(handle);
        }
        debug!(
            generation = active.generation,
            progress = active.last_progress,
            "cancel transition"
        );
        true
    }

    /// Handles one frame callback.
    ///
    /// Returns `None` for stale or unknown handles. Otherwise computes the
    /// interpolated snapshot for the current time and re-requests a frame
    /// unless progress reached `1`.
    pub fn tick<H: FrameHost>(&mut self, handle: FrameHandle, host: &mut H) -> Option<FrameTick<T>> {
        let tick = {
            let active = self.active.as_mut()?;
            if active.pending != Some(handle) {
                trace!(handle = handle.raw(), "ignoring stale frame");
                return None;
            }
            active.pending = None;

            // Host clocks are expected to be monotonic; progress never steps back anyway.
            let progress = active
                .transition
                .progress_at(host.now_ms())
                .max(active.last_progress);
            active.last_progress = progress;
            let eased = active.transition.easing.apply(progress);

            FrameTick {
                progress,
                eased,
                snapshot: active.transition.snapshot_at(eased),
                finished: progress >= 1.0,
                generation: active.generation,
            }
        };

        if tick.finished {
            self.active = None;
            debug!(generation = tick.generation, "transition finished");
        } else if let Some(active) = self.active.as_mut() {
            active.pending = Some(host.request_frame());
        }

        trace!(
            generation = tick.generation,
            progress = tick.progress,
            eased = tick.eased,
            "transition frame"
        );
        Some(tick)
    }
}
