// Tracker core: one instance per page view. Owns all mutable tracking state
// (fired thresholds, open section, scroll settling) and turns host signals
// into analytics events.

use crate::classify::classify_click;
use crate::debounce::Debouncer;
use crate::dwell::SectionDwellTracker;
use crate::scroll::ScrollDepthTracker;
use crate::session::{self, SessionTracker};
use crate::sink::{self, EventSink};
use crate::types::{
    AnalyticsEvent, SignalBatch, SignalKind, Timestamp, TrackerConfig, ViewSnapshot,
};

/// Processes timestamped signal batches into analytics events.
///
/// Scroll signals are coalesced: a burst only evaluates depth and dwell once
/// no further scroll arrived for the configured quiet window, driven by the
/// host's `Tick` pulses.
pub struct TrackerCore {
    config: TrackerConfig,
    session: SessionTracker,
    depth: ScrollDepthTracker,
    dwell: SectionDwellTracker,
    settler: Debouncer,
    pending_view: Option<ViewSnapshot>,
}

impl TrackerCore {
    pub fn new(config: TrackerConfig) -> Self {
        let settler = Debouncer::new(config.scroll_quiet_ms);
        let dwell = SectionDwellTracker::new(config.dwell_min_secs);
        TrackerCore {
            config,
            session: SessionTracker::new(),
            depth: ScrollDepthTracker::new(),
            dwell,
            settler,
            pending_view: None,
        }
    }

    /// Process a batch of signals in order and return the events to emit.
    pub fn process(&mut self, batch: &SignalBatch) -> Vec<AnalyticsEvent> {
        let mut events = Vec::new();

        for signal in &batch.signals {
            let now = signal.timestamp;
            match &signal.kind {
                SignalKind::PageReady { view } => {
                    events.extend(self.session.initial_page_view(&self.config));
                    // Opens the first dwell section; nothing to close yet.
                    events.extend(self.dwell.observe(view, now));
                }
                SignalKind::Click { link } => {
                    events.extend(classify_click(link.as_ref()));
                }
                SignalKind::Scroll { view } => {
                    self.settler.observe(now);
                    self.pending_view = Some(view.clone());
                }
                SignalKind::Tick => {
                    if self.settler.poll(now) {
                        if let Some(view) = self.pending_view.take() {
                            events.extend(self.evaluate_settled(&view, now));
                        }
                    }
                }
                SignalKind::TouchStart {
                    element_tag,
                    class_name,
                } => {
                    events.extend(session::touch_start(element_tag, class_name));
                }
                SignalKind::VideoEmbedClick { title } => {
                    events.push(session::video_embed_click(title.as_deref()));
                }
                SignalKind::WidgetLoad { widget, location } => {
                    events.push(session::widget_load(widget, location));
                }
                SignalKind::ScriptError { message } => {
                    events.push(session::script_error(message, &self.config));
                }
                SignalKind::ResourceError { url } => {
                    events.push(session::resource_error(url, &self.config));
                }
                SignalKind::PageLoad {
                    navigation_start,
                    load_event_end,
                } => {
                    events.extend(self.session.page_load_time(
                        *navigation_start,
                        *load_event_end,
                        &self.config,
                    ));
                }
            }
        }

        events
    }

    /// Process a batch and forward the events straight to a sink.
    pub fn process_into(&mut self, batch: &SignalBatch, sink: &dyn EventSink) {
        let events = self.process(batch);
        sink::dispatch(sink, &events);
    }

    /// A settled scroll position: fire newly crossed depth thresholds against
    /// the freshly resolved section, then update dwell.
    fn evaluate_settled(&mut self, view: &ViewSnapshot, now: Timestamp) -> Vec<AnalyticsEvent> {
        let section = SectionDwellTracker::current_section(view);
        let mut events = self.depth.evaluate(&view.viewport, &section);
        events.extend(self.dwell.observe(view, now));
        events
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::VecSink;
    use crate::types::{LinkTarget, SectionProbe, Signal, ViewportState};

    fn signal(ms: u64, kind: SignalKind) -> Signal {
        Signal {
            timestamp: Timestamp::from_millis(ms),
            kind,
        }
    }

    fn batch(signals: Vec<Signal>) -> SignalBatch {
        SignalBatch { signals }
    }

    fn scroll_view(scroll_y: f64, sections: &[(&str, f64)]) -> ViewSnapshot {
        ViewSnapshot {
            viewport: ViewportState::new(scroll_y, 1000.0, 2000.0),
            sections: sections
                .iter()
                .map(|(id, top)| SectionProbe::new(*id, *top))
                .collect(),
        }
    }

    #[test]
    fn page_ready_emits_initial_view_once() {
        let mut core = TrackerCore::new(TrackerConfig::default());
        let ready = || signal(0, SignalKind::PageReady {
            view: scroll_view(0.0, &[("hero", 0.0)]),
        });

        let events = core.process(&batch(vec![ready()]));
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            AnalyticsEvent::ContentEngagement { .. }
        ));

        // A duplicate ready signal does not re-emit the page view.
        assert!(core.process(&batch(vec![ready()])).is_empty());
    }

    #[test]
    fn scroll_burst_evaluates_once_after_quiet_window() {
        let mut core = TrackerCore::new(TrackerConfig::default());
        core.process(&batch(vec![signal(0, SignalKind::PageReady {
            view: scroll_view(0.0, &[("hero", 0.0)]),
        })]));

        let events = core.process(&batch(vec![
            signal(1_000, SignalKind::Scroll { view: scroll_view(300.0, &[("hero", -300.0)]) }),
            signal(1_030, SignalKind::Scroll { view: scroll_view(600.0, &[("hero", -600.0)]) }),
            signal(1_060, SignalKind::Scroll { view: scroll_view(800.0, &[("hero", -800.0), ("tour", 100.0)]) }),
            signal(1_100, SignalKind::Tick), // still inside the quiet window
            signal(1_160, SignalKind::Tick), // settles here
            signal(1_260, SignalKind::Tick), // nothing pending anymore
        ]));

        // Single evaluation at 80%: thresholds 25, 50, 75 against section
        // "tour" (hero has scrolled past, tour's top is above the midpoint).
        let depths: Vec<(u8, String)> = events
            .iter()
            .filter_map(|e| match e {
                AnalyticsEvent::ScrollDepth { percent, section } => {
                    Some((*percent, section.clone()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            depths,
            vec![
                (25, "tour".to_string()),
                (50, "tour".to_string()),
                (75, "tour".to_string())
            ]
        );
    }

    #[test]
    fn dwell_closes_previous_section_on_settled_switch() {
        let mut core = TrackerCore::new(TrackerConfig::default());
        core.process(&batch(vec![signal(0, SignalKind::PageReady {
            view: scroll_view(0.0, &[("hero", 0.0)]),
        })]));

        let events = core.process(&batch(vec![
            signal(5_000, SignalKind::Scroll { view: scroll_view(800.0, &[("hero", -800.0), ("tour", 100.0)]) }),
            signal(5_100, SignalKind::Tick),
        ]));

        assert!(events.contains(&AnalyticsEvent::TimeOnSection {
            section: "hero".to_string(),
            seconds: 5,
        }));
    }

    #[test]
    fn clicks_are_classified_inline_without_debounce() {
        let mut core = TrackerCore::new(TrackerConfig::default());
        let link = LinkTarget {
            class_name: "nav__link".to_string(),
            href: Some("#merch".to_string()),
            text: "Merch".to_string(),
            ..Default::default()
        };

        let events = core.process(&batch(vec![signal(
            2_000,
            SignalKind::Click { link: Some(link) },
        )]));
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], AnalyticsEvent::Navigation { .. }));

        // Plain-text click: no link ancestor, no event, no panic.
        let none = core.process(&batch(vec![signal(2_100, SignalKind::Click { link: None })]));
        assert!(none.is_empty());
    }

    #[test]
    fn lifecycle_signals_flow_through() {
        let mut core = TrackerCore::new(TrackerConfig {
            page_path: "/".to_string(),
            ..Default::default()
        });

        let events = core.process(&batch(vec![
            signal(100, SignalKind::ScriptError { message: "oops".to_string() }),
            signal(200, SignalKind::ResourceError { url: "/hero.jpg".to_string() }),
            signal(300, SignalKind::PageLoad { navigation_start: 50, load_event_end: 1_250 }),
            signal(400, SignalKind::WidgetLoad {
                widget: "bandsintown".to_string(),
                location: "tours_section".to_string(),
            }),
            signal(500, SignalKind::VideoEmbedClick { title: None }),
            signal(600, SignalKind::TouchStart {
                element_tag: "a".to_string(),
                class_name: String::new(),
            }),
        ]));

        assert_eq!(events.len(), 6);
        assert!(events.contains(&AnalyticsEvent::Performance {
            metric: "page_load_time".to_string(),
            value_ms: 1_200,
            path: "/".to_string(),
        }));
    }

    #[test]
    fn process_into_forwards_to_sink() {
        let mut core = TrackerCore::new(TrackerConfig::default());
        let sink = VecSink::new();
        core.process_into(
            &batch(vec![signal(0, SignalKind::PageReady {
                view: scroll_view(0.0, &[]),
            })]),
            &sink,
        );
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn thresholds_survive_across_batches() {
        let mut core = TrackerCore::new(TrackerConfig::default());

        core.process(&batch(vec![
            signal(1_000, SignalKind::Scroll { view: scroll_view(1000.0, &[]) }),
            signal(1_100, SignalKind::Tick),
        ]));
        // All five fired; a later batch at the same depth fires none again.
        let later = core.process(&batch(vec![
            signal(9_000, SignalKind::Scroll { view: scroll_view(1000.0, &[]) }),
            signal(9_100, SignalKind::Tick),
        ]));
        assert!(!later
            .iter()
            .any(|e| matches!(e, AnalyticsEvent::ScrollDepth { .. })));
    }
}
