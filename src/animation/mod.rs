//! Frame-paced transition driving.

mod host;
mod scheduler;
mod transition;

pub use host::{FrameHandle, FrameHost, ManualFrameHost};
pub use scheduler::{FrameScheduler, FrameTick, SchedulerState};
pub use transition::{DEFAULT_TRANSITION_DURATION_MS, Transition};
