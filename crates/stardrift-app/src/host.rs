//! Callbacks the host environment injects into the animator.

use stardrift_field::Viewport;

/// A viewport change reported by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeEvent {
    /// New logical width.
    pub width: f32,
    /// New logical height.
    pub height: f32,
    /// New device pixel ratio.
    pub pixel_ratio: f64,
    /// Host clock reading when the event fired, same clock as frame timestamps.
    pub at_ms: f64,
}

impl ResizeEvent {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height, self.pixel_ratio)
    }
}

/// Requests another display-refresh callback from the host.
pub trait FrameScheduler {
    /// Ask for `on_frame` to be called once more at the next refresh.
    fn request_frame(&mut self);
}

/// Delivers viewport changes from the host.
pub trait ResizeSource {
    /// Next resize event that fired at or before `now_ms`, oldest first.
    fn poll_resize(&mut self, now_ms: f64) -> Option<ResizeEvent>;
}

/// A source with no resize events.
impl ResizeSource for () {
    fn poll_resize(&mut self, _now_ms: f64) -> Option<ResizeEvent> {
        None
    }
}

/// Scheduler that only counts requests. Useful for hosts that poll
/// [`pending`](Self::pending) instead of registering callbacks.
#[derive(Debug, Default)]
pub struct FrameRequests {
    requested: u64,
    pending: bool,
}

impl FrameRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame was requested since the last [`take`](Self::take).
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending request.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Total requests ever made.
    pub fn total(&self) -> u64 {
        self.requested
    }
}

impl FrameScheduler for FrameRequests {
    fn request_frame(&mut self) {
        self.requested += 1;
        self.pending = true;
    }
}
