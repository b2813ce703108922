// tracker_core: analytics auto-tracking engine for the artist site.
// The JS host is plumbing: it snapshots DOM context into signals and forwards
// the returned events to the analytics sink. All classification and
// attribution state lives here.

mod classify;
mod debounce;
mod dwell;
mod error;
mod scroll;
mod session;
mod sink;
mod tracker;
mod types;

use wasm_bindgen::prelude::*;

pub use classify::{classify_click, domain_from_url, element_location, platform_from_url};
pub use debounce::Debouncer;
pub use dwell::{SectionDwellTracker, UNKNOWN_SECTION};
pub use error::TrackerError;
pub use scroll::{ScrollDepthTracker, DEPTH_THRESHOLDS};
pub use session::SessionTracker;
pub use sink::{dispatch, EventSink, VecSink};
pub use tracker::TrackerCore;
pub use types::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Main tracker interface exposed to JavaScript.
/// Batch interface to minimize JS↔WASM crossings.
#[wasm_bindgen]
pub struct Tracker {
    core: TrackerCore,
}

#[wasm_bindgen]
impl Tracker {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Tracker, JsValue> {
        let config: TrackerConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&TrackerError::InvalidConfig(e.to_string()).to_string()))?;

        Ok(Tracker {
            core: TrackerCore::new(config),
        })
    }

    /// Process a batch of signals and return the analytics events to emit,
    /// as JSON. The host dispatches each event to the sink; sink calls are
    /// fire-and-forget on that side of the boundary.
    pub fn process_signals(&mut self, signals_json: &str) -> Result<String, JsValue> {
        let batch: SignalBatch = serde_json::from_str(signals_json)
            .map_err(|e| JsValue::from_str(&TrackerError::InvalidSignals(e.to_string()).to_string()))?;

        let result = TrackingResult {
            events: self.core.process(&batch),
        };

        serde_json::to_string(&result)
            .map_err(|e| JsValue::from_str(&TrackerError::from(e).to_string()))
    }
}
