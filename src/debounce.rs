// Explicit coalescing primitive for event bursts. Replaces the implicit
// timer-id-reassignment debounce pattern with something unit-testable against
// plain timestamps.

use crate::types::Timestamp;

/// Fires at most once per burst, after a quiet window with no new observations.
///
/// `observe` arms (or re-arms) the deadline; `poll` reports whether the quiet
/// window has elapsed, disarming itself on the first positive answer.
pub struct Debouncer {
    quiet_window_ms: u64,
    deadline: Option<Timestamp>,
}

impl Debouncer {
    pub fn new(quiet_window_ms: u64) -> Self {
        Debouncer {
            quiet_window_ms,
            deadline: None,
        }
    }

    /// Note a burst event at `now`, pushing the deadline out by the quiet
    /// window.
    pub fn observe(&mut self, now: Timestamp) {
        self.deadline = Some(Timestamp::from_millis(
            now.as_millis() + self.quiet_window_ms,
        ));
    }

    /// True exactly once per armed burst, the first time `now` reaches the
    /// deadline.
    pub fn poll(&mut self, now: Timestamp) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
