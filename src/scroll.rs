// Scroll depth tracking. Each threshold fires at most once per page view; a
// fast scroll past several thresholds fires them all in one pass, ascending.

use crate::types::{AnalyticsEvent, ViewportState};

/// Depth thresholds, ascending. Fixed for the life of a page view.
pub const DEPTH_THRESHOLDS: [u8; 5] = [25, 50, 75, 90, 100];

/// Tracks which scroll depth thresholds have fired this page view.
pub struct ScrollDepthTracker {
    fired: [bool; DEPTH_THRESHOLDS.len()],
}

impl ScrollDepthTracker {
    pub fn new() -> Self {
        ScrollDepthTracker {
            fired: [false; DEPTH_THRESHOLDS.len()],
        }
    }

    /// Percent of the scrollable distance covered, rounded.
    ///
    /// Convention for short pages: when the content is no taller than the
    /// viewport there is nothing left to scroll, so the page counts as 100%
    /// scrolled.
    pub fn scroll_percent(viewport: &ViewportState) -> u8 {
        let scrollable = viewport.document_height - viewport.viewport_height;
        if scrollable <= 0.0 {
            return 100;
        }
        let percent = (viewport.scroll_y / scrollable * 100.0).round();
        percent.clamp(0.0, u8::MAX as f64) as u8
    }

    /// Evaluate a settled scroll position and return newly crossed thresholds,
    /// ascending. Thresholds never re-fire.
    pub fn evaluate(&mut self, viewport: &ViewportState, section: &str) -> Vec<AnalyticsEvent> {
        let percent = Self::scroll_percent(viewport);
        let mut events = Vec::new();

        for (i, &threshold) in DEPTH_THRESHOLDS.iter().enumerate() {
            if percent >= threshold && !self.fired[i] {
                self.fired[i] = true;
                events.push(AnalyticsEvent::ScrollDepth {
                    percent: threshold,
                    section: section.to_string(),
                });
            }
        }

        events
    }

    /// Thresholds already fired, ascending.
    pub fn fired_thresholds(&self) -> Vec<u8> {
        DEPTH_THRESHOLDS
            .iter()
            .zip(self.fired.iter())
            .filter(|(_, &fired)| fired)
            .map(|(&threshold, _)| threshold)
            .collect()
    }
}

impl Default for ScrollDepthTracker {
    fn default() -> Self {
        Self::new()
    }
}
