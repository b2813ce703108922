// Strong typing over strings. Newtypes for timestamps, signal and event payloads.
// The JS host snapshots DOM context (classes, ancestors, geometry); the core never
// touches the DOM itself.

use serde::{Deserialize, Serialize};

/// Timestamp in milliseconds. Newtype for type safety; only deltas matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn as_secs(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Milliseconds elapsed since an earlier timestamp. Saturates at zero.
    pub fn elapsed_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Page scroll geometry at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewportState {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ViewportState {
    pub fn new(scroll_y: f64, viewport_height: f64, document_height: f64) -> Self {
        ViewportState {
            scroll_y,
            viewport_height,
            document_height,
        }
    }
}

/// A page section with an identifier, positioned relative to the viewport top
/// (the host reads `getBoundingClientRect().top`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProbe {
    pub id: String,
    pub top: f64,
}

impl SectionProbe {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        SectionProbe {
            id: id.into(),
            top,
        }
    }
}

/// Scroll-time snapshot: geometry plus every identified section on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewSnapshot {
    pub viewport: ViewportState,
    #[serde(default)]
    pub sections: Vec<SectionProbe>,
}

/// Ancestry context for a clicked link, resolved by the host via `closest()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LinkContext {
    /// Id of the nearest enclosing section that has one.
    #[serde(default)]
    pub section_id: Option<String>,
    /// Inside a `<nav>` landmark.
    #[serde(default)]
    pub in_nav: bool,
    /// Inside a `<footer>` landmark.
    #[serde(default)]
    pub in_footer: bool,
    /// Name field of the enclosing product card, when present.
    #[serde(default)]
    pub product_name: Option<String>,
    /// Title field of the enclosing store card, when present.
    #[serde(default)]
    pub store_title: Option<String>,
}

/// The nearest enclosing link of a click target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LinkTarget {
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub context: LinkContext,
}

impl LinkTarget {
    /// Visible label: trimmed text, else alt text, else a fixed fallback.
    pub fn label(&self) -> String {
        let text = self.text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
        match &self.alt {
            Some(alt) if !alt.is_empty() => alt.clone(),
            _ => "Link".to_string(),
        }
    }
}

/// Batch of signals from the host (minimizes JS↔WASM crossings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalBatch {
    pub signals: Vec<Signal>,
}

/// Single timestamped signal observed by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub timestamp: Timestamp,
    pub kind: SignalKind,
}

/// What the host observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SignalKind {
    /// The page is interactive: the initial view snapshot. Sent first, once.
    PageReady { view: ViewSnapshot },
    /// A click anywhere on the page. `link` is the nearest enclosing anchor,
    /// if any; a plain-text click carries `None` and classifies to nothing.
    Click { link: Option<LinkTarget> },
    /// A raw scroll event with the current view snapshot. Coalesced by the
    /// debouncer; depth and dwell are evaluated on settle.
    Scroll { view: ViewSnapshot },
    /// Periodic pulse (timer or rAF) that lets a pending scroll burst settle.
    Tick,
    /// Touch start on an element (mobile).
    TouchStart {
        element_tag: String,
        #[serde(default)]
        class_name: String,
    },
    /// Click on a video embed container.
    VideoEmbedClick {
        #[serde(default)]
        title: Option<String>,
    },
    /// A third-party widget iframe finished loading.
    WidgetLoad { widget: String, location: String },
    /// Uncaught script error.
    ScriptError { message: String },
    /// A sub-resource (image, script) failed to load.
    ResourceError { url: String },
    /// Navigation timing became available after the page load event.
    PageLoad {
        navigation_start: u64,
        load_event_end: u64,
    },
}

/// One analytics event per sink method. Tagged for the JS host to dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum AnalyticsEvent {
    Navigation {
        label: String,
        href: Option<String>,
        source: String,
    },
    ProductView {
        product: String,
        category: String,
        placement: String,
    },
    Merchandise {
        item: String,
        category: String,
        value: u32,
        location: String,
        action: String,
    },
    StoreRedirect {
        store: String,
        kind: String,
        placement: String,
    },
    FooterInteraction {
        kind: String,
        href: Option<String>,
    },
    LegalPageView {
        page: String,
    },
    SocialClick {
        platform: String,
        location: String,
        kind: String,
    },
    ContentEngagement {
        content_type: String,
        identifier: String,
        action: String,
        value: u32,
    },
    ScrollDepth {
        percent: u8,
        section: String,
    },
    TimeOnSection {
        section: String,
        seconds: u64,
    },
    VideoInteraction {
        title: String,
        action: String,
        position: u32,
    },
    WidgetInteraction {
        widget: String,
        action: String,
        location: String,
    },
    MobileInteraction {
        gesture: String,
        element: String,
        action: String,
    },
    Error {
        kind: String,
        message: String,
        path: String,
    },
    Performance {
        metric: String,
        value_ms: u64,
        path: String,
    },
}

/// Tracker configuration passed from the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Page identifier for the initial page-view event.
    #[serde(default = "default_page_id")]
    pub page_id: String,
    /// Current path, attached to error and performance events.
    #[serde(default = "default_page_path")]
    pub page_path: String,
    /// Quiet window for scroll settling (milliseconds).
    #[serde(default = "default_quiet_window_ms")]
    pub scroll_quiet_ms: u64,
    /// Minimum dwell before a section's time is reported (seconds).
    #[serde(default = "default_dwell_min_secs")]
    pub dwell_min_secs: u64,
}

fn default_page_id() -> String {
    "homepage".to_string()
}

fn default_page_path() -> String {
    "/".to_string()
}

fn default_quiet_window_ms() -> u64 {
    100
}

fn default_dwell_min_secs() -> u64 {
    2
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            page_id: default_page_id(),
            page_path: default_page_path(),
            scroll_quiet_ms: default_quiet_window_ms(),
            dwell_min_secs: default_dwell_min_secs(),
        }
    }
}

/// Events produced by one `process_signals` call, returned to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingResult {
    pub events: Vec<AnalyticsEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_conversions() {
        let ts = Timestamp::from_millis(1500);
        assert_eq!(ts.as_millis(), 1500);
        assert!((ts.as_secs() - 1.5).abs() < 0.0001);
    }

    #[test]
    fn elapsed_saturates() {
        let early = Timestamp::from_millis(2000);
        let late = Timestamp::from_millis(5000);
        assert_eq!(late.elapsed_since(early), 3000);
        assert_eq!(early.elapsed_since(late), 0);
    }

    #[test]
    fn link_label_fallback_chain() {
        let mut link = LinkTarget {
            text: "  Tour Dates  ".to_string(),
            ..Default::default()
        };
        assert_eq!(link.label(), "Tour Dates");

        link.text = "   ".to_string();
        link.alt = Some("Band photo".to_string());
        assert_eq!(link.label(), "Band photo");

        link.alt = None;
        assert_eq!(link.label(), "Link");
    }

    #[test]
    fn config_defaults_apply_on_empty_json() {
        let config: TrackerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.page_id, "homepage");
        assert_eq!(config.scroll_quiet_ms, 100);
        assert_eq!(config.dwell_min_secs, 2);
    }

    #[test]
    fn click_signal_parses_with_sparse_link() {
        let json = r##"{
            "timestamp": 1000,
            "kind": { "type": "Click", "link": { "class_name": "nav__link", "href": "#tour", "text": "Tour" } }
        }"##;
        let signal: Signal = serde_json::from_str(json).unwrap();
        match signal.kind {
            SignalKind::Click { link: Some(link) } => {
                assert_eq!(link.class_name, "nav__link");
                assert!(!link.context.in_nav);
            }
            _ => panic!("expected click signal"),
        }
    }
}
