// Section dwell attribution. At most one section is open at a time; the
// previous section's duration is closed out before the next one opens.

use crate::types::{AnalyticsEvent, SectionProbe, Timestamp, ViewSnapshot};

/// Section id reported when no section qualifies as current.
pub const UNKNOWN_SECTION: &str = "unknown";

/// Tracks which section the viewer is on and for how long.
pub struct SectionDwellTracker {
    /// Minimum dwell (seconds, after rounding) before time is reported.
    min_dwell_secs: u64,
    current: Option<OpenSection>,
}

struct OpenSection {
    id: String,
    opened_at: Timestamp,
}

impl SectionDwellTracker {
    pub fn new(min_dwell_secs: u64) -> Self {
        SectionDwellTracker {
            min_dwell_secs,
            current: None,
        }
    }

    /// The section whose top edge has scrolled to or above the viewport
    /// midpoint and sits closest to the top. Falls back to `"unknown"`.
    pub fn current_section(view: &ViewSnapshot) -> String {
        let midpoint = view.viewport.viewport_height / 2.0;
        let mut current = UNKNOWN_SECTION.to_string();
        let mut min_distance = f64::INFINITY;

        for SectionProbe { id, top } in &view.sections {
            let distance = top.abs();
            if distance < min_distance && *top <= midpoint {
                min_distance = distance;
                current = id.clone();
            }
        }

        current
    }

    /// Record a settled view. When the current section changes, close out the
    /// previous one (emitting its dwell time if long enough) and open the new
    /// one. The very first call only opens.
    pub fn observe(&mut self, view: &ViewSnapshot, now: Timestamp) -> Vec<AnalyticsEvent> {
        let section = Self::current_section(view);
        let mut events = Vec::new();

        match &self.current {
            Some(open) if open.id == section => {}
            _ => {
                if let Some(closed) = self.current.take() {
                    let seconds =
                        (now.elapsed_since(closed.opened_at) as f64 / 1000.0).round() as u64;
                    if seconds > self.min_dwell_secs {
                        events.push(AnalyticsEvent::TimeOnSection {
                            section: closed.id,
                            seconds,
                        });
                    }
                }
                self.current = Some(OpenSection {
                    id: section,
                    opened_at: now,
                });
            }
        }

        events
    }

    /// Id of the section currently open, if any.
    pub fn open_section(&self) -> Option<&str> {
        self.current.as_ref().map(|open| open.id.as_str())
    }
}
