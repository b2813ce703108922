// Page-lifecycle events that fire at most once per view, plus the simple
// passthrough interactions (touch, video embeds, widget loads).

use crate::types::{AnalyticsEvent, TrackerConfig};

/// One-shot page events: the initial page view and the load-time metric.
pub struct SessionTracker {
    page_view_sent: bool,
    load_time_sent: bool,
}

impl SessionTracker {
    pub fn new() -> Self {
        SessionTracker {
            page_view_sent: false,
            load_time_sent: false,
        }
    }

    /// The initial page-view engagement. Emits exactly once.
    pub fn initial_page_view(&mut self, config: &TrackerConfig) -> Option<AnalyticsEvent> {
        if self.page_view_sent {
            return None;
        }
        self.page_view_sent = true;
        Some(AnalyticsEvent::ContentEngagement {
            content_type: "page".to_string(),
            identifier: config.page_id.clone(),
            action: "initial_load".to_string(),
            value: 0,
        })
    }

    /// Page load time from navigation timing. Emits once, and only when the
    /// timing data is coherent.
    pub fn page_load_time(
        &mut self,
        navigation_start: u64,
        load_event_end: u64,
        config: &TrackerConfig,
    ) -> Option<AnalyticsEvent> {
        if self.load_time_sent || load_event_end < navigation_start {
            return None;
        }
        self.load_time_sent = true;
        Some(AnalyticsEvent::Performance {
            metric: "page_load_time".to_string(),
            value_ms: load_event_end - navigation_start,
            path: config.page_path.clone(),
        })
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Uncaught script error → analytics event. The tracker keeps running.
pub fn script_error(message: &str, config: &TrackerConfig) -> AnalyticsEvent {
    AnalyticsEvent::Error {
        kind: "javascript_error".to_string(),
        message: message.to_string(),
        path: config.page_path.clone(),
    }
}

/// Failed sub-resource load → analytics event.
pub fn resource_error(url: &str, config: &TrackerConfig) -> AnalyticsEvent {
    AnalyticsEvent::Error {
        kind: "resource_error".to_string(),
        message: format!("Failed to load: {}", url),
        path: config.page_path.clone(),
    }
}

/// Touch start on a link or social icon → mobile interaction. Anything else
/// is ignored.
pub fn touch_start(element_tag: &str, class_name: &str) -> Option<AnalyticsEvent> {
    let tag = element_tag.to_lowercase();
    if tag != "a" && !class_name.contains("social-icon") {
        return None;
    }
    Some(AnalyticsEvent::MobileInteraction {
        gesture: "touch_start".to_string(),
        element: tag,
        action: "tap".to_string(),
    })
}

/// Click on a video embed container.
pub fn video_embed_click(title: Option<&str>) -> AnalyticsEvent {
    AnalyticsEvent::VideoInteraction {
        title: title
            .filter(|t| !t.is_empty())
            .unwrap_or("YouTube Video")
            .to_string(),
        action: "click_to_play".to_string(),
        position: 0,
    }
}

/// A third-party widget iframe finished loading.
pub fn widget_load(widget: &str, location: &str) -> AnalyticsEvent {
    AnalyticsEvent::WidgetInteraction {
        widget: widget.to_string(),
        action: "load".to_string(),
        location: location.to_string(),
    }
}
