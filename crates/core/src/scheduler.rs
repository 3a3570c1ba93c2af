//! The frame-scheduling seam: "run before the next repaint" and its cancel.
//!
//! In a browser this is `requestAnimationFrame` / `cancelAnimationFrame`.
//! [`ManualScheduler`] is the headless counterpart: it hands out handles and
//! lets the caller decide when a requested frame fires.

use serde::Serialize;

/// Opaque identifier of a requested frame, as returned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FrameHandle(pub i32);

/// Host primitive for scheduling one callback before the next repaint.
///
/// This trait is **object-safe**.
pub trait FrameScheduler {
    /// Requests one frame callback. Returns `None` if the host refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Cancels a previously requested frame so its callback never runs.
    ///
    /// Cancelling a handle that already fired or was already cancelled is a
    /// no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A scheduler driven by hand, for tests and offline rendering.
///
/// Requested frames queue up in order; [`fire`](Self::fire) pops the oldest
/// one, which the caller then delivers to the animation.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    outstanding: Vec<FrameHandle>,
    cancelled: Vec<FrameHandle>,
    requested: usize,
    refuse: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `request_frame` calls fail, as a host without a
    /// repaint loop would.
    pub fn set_refuse(&mut self, refuse: bool) {
        self.refuse = refuse;
    }

    /// Removes and returns the oldest outstanding frame, if any.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        if self.outstanding.is_empty() {
            None
        } else {
            Some(self.outstanding.remove(0))
        }
    }

    /// Frames requested but neither fired nor cancelled.
    pub fn outstanding(&self) -> &[FrameHandle] {
        &self.outstanding
    }

    /// Every handle passed to `cancel_frame`, in call order.
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }

    /// Total successful `request_frame` calls.
    pub fn requested(&self) -> usize {
        self.requested
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        if self.refuse {
            return None;
        }
        self.next_id = self.next_id.wrapping_add(1);
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.outstanding.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.outstanding.retain(|&h| h != handle);
        self.cancelled.push(handle);
    }
}
