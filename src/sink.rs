// Event sink seam for native hosts. The sink is attached explicitly at
// construction; there is no polling for a late-defined collaborator. Every
// call is best-effort: a panicking sink is logged and skipped, never fatal.

use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::types::AnalyticsEvent;

/// Receives analytics events, one call per event. Fire-and-forget; return
/// values are never inspected.
pub trait EventSink {
    fn emit(&self, event: &AnalyticsEvent);
}

/// Forward a batch of events to a sink, isolating each call so one bad event
/// cannot take the tracker down with it.
pub fn dispatch(sink: &dyn EventSink, events: &[AnalyticsEvent]) {
    for event in events {
        if catch_unwind(AssertUnwindSafe(|| sink.emit(event))).is_err() {
            log::warn!("analytics sink panicked; event dropped: {:?}", event);
        }
    }
}

/// Collects events in memory. Used by tests and as a staging buffer.
#[derive(Default)]
pub struct VecSink {
    events: RefCell<Vec<AnalyticsEvent>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<AnalyticsEvent> {
        self.events.take()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventSink for VecSink {
    fn emit(&self, event: &AnalyticsEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
