//! Resize debouncing: a burst of resize events collapses into one
//! regeneration once the host has been quiet for a while.

use crate::host::ResizeEvent;

/// Holds the latest resize until no newer one has arrived for `quiet_ms`.
#[derive(Debug)]
pub struct ResizeDebouncer {
    quiet_ms: f64,
    pending: Option<ResizeEvent>,
    deadline_ms: f64,
    coalesced: u64,
}

impl ResizeDebouncer {
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms: quiet_ms.max(0.0),
            pending: None,
            deadline_ms: 0.0,
            coalesced: 0,
        }
    }

    /// Record an event, replacing any pending one and restarting the quiet window.
    pub fn push(&mut self, event: ResizeEvent) {
        if self.pending.is_some() {
            self.coalesced += 1;
        }
        self.deadline_ms = event.at_ms + self.quiet_ms;
        self.pending = Some(event);
    }

    /// The latest event, once `now_ms` has reached the end of its quiet window.
    /// Returns each settled event exactly once.
    pub fn poll(&mut self, now_ms: f64) -> Option<ResizeEvent> {
        if self.pending.is_some() && now_ms >= self.deadline_ms {
            return self.pending.take();
        }
        None
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Events superseded by a newer one before their window elapsed.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }

    pub fn quiet_ms(&self) -> f64 {
        self.quiet_ms
    }
}
