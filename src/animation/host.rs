use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Identifier of one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(u64);

impl FrameHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Frame-paced callback source provided by the embedding host.
///
/// A browser host maps this onto `requestAnimationFrame` and a monotonic
/// clock; when a requested frame fires, the host calls
/// [`Chart::on_frame`](crate::api::Chart::on_frame) with the same handle.
pub trait FrameHost {
    /// Monotonic time in milliseconds.
    fn now_ms(&self) -> f64;

    fn request_frame(&mut self) -> FrameHandle;

    /// Cancelled handles must never be delivered afterwards.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

impl<H: FrameHost> FrameHost for Rc<RefCell<H>> {
    fn now_ms(&self) -> f64 {
        self.borrow().now_ms()
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.borrow_mut().request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.borrow_mut().cancel_frame(handle);
    }
}

/// Deterministic host for headless rendering and tests.
///
/// Time only moves through [`ManualFrameHost::advance`]. Every frame pending
/// at that moment becomes due; frames requested while the due batch is being
/// dispatched wait for the next advance.
#[derive(Debug, Default)]
pub struct ManualFrameHost {
    now_ms: f64,
    next_handle: u64,
    pending: Vec<FrameHandle>,
    cancelled: usize,
}

impl ManualFrameHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn pending_frames(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Number of frames cancelled while still pending.
    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }

    /// Moves the clock forward and returns the frames that are now due.
    pub fn advance(&mut self, delta_ms: f64) -> Vec<FrameHandle> {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.now_ms += delta_ms;
        }
        std::mem::take(&mut self.pending)
    }
}

impl FrameHost for ManualFrameHost {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle::new(self.next_handle);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|pending| *pending != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{FrameHost, ManualFrameHost};

    #[test]
    fn cancelled_frames_are_never_due() {
        let mut host = ManualFrameHost::new();
        let first = host.request_frame();
        let second = host.request_frame();
        host.cancel_frame(first);

        assert_eq!(host.advance(16.0), vec![second]);
        assert_eq!(host.cancelled_count(), 1);
        assert_eq!(host.now_ms(), 16.0);
        assert!(host.advance(16.0).is_empty());
    }

    #[test]
    fn shared_host_hands_out_unique_handles() {
        let shared = Rc::new(RefCell::new(ManualFrameHost::starting_at(100.0)));
        let mut a = Rc::clone(&shared);
        let mut b = Rc::clone(&shared);
        let first = a.request_frame();
        let second = b.request_frame();
        assert_ne!(first, second);
        assert_eq!(a.now_ms(), 100.0);
        assert_eq!(shared.borrow().pending_frames().len(), 2);
    }
}
