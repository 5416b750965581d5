// Tracker core
// Recording is synchronous and infallible: events land on an in-memory
// queue and the network only ever runs on the flush path

use std::collections::HashSet;
use std::future::Future;
use std::mem;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::json;
use tokio::sync::Notify;
use tracing::{debug, warn};
use uuid::Uuid;

use tracker_domain::{
    classify_browser, classify_click, classify_device, classify_os, crossed_milestones,
    extract_utm, on_flush_failure, scroll_depth_percent, session_ttl, AnalyticsEvent, ClickAction,
    DomNode, EventContext, EventKind, FailureDisposition, InterestSignal, Platform, SourceReport,
    TelemetryTransport, TrackerOptions, SOURCE_COOKIE,
};

use crate::metrics::TrackerMetrics;
use crate::session::SessionManager;

/// Visible time below this floor is noise and never reported.
const MIN_TIME_ON_PAGE_MS: i64 = 5_000;

/// Result of one flush pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// The queue was empty.
    Idle,
    Sent(usize),
    Requeued(usize),
    Dropped(usize),
}

#[derive(Default)]
struct PageState {
    max_scroll_depth: u8,
    milestones: HashSet<u8>,
    visible_since: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct Tracker {
    options: TrackerOptions,
    active: bool,
    platform: Arc<dyn Platform>,
    transport: Arc<dyn TelemetryTransport>,
    session: Arc<SessionManager>,
    queue: Arc<Mutex<Vec<AnalyticsEvent>>>,
    flush_wakeup: Arc<Notify>,
    page_state: Arc<Mutex<PageState>>,
    metrics: Arc<TrackerMetrics>,
}

impl Tracker {
    /// Builds the tracker and resolves the session cookie. With an
    /// unavailable platform or `enabled: false` every later call is a
    /// no-op.
    pub fn new(
        options: TrackerOptions,
        platform: Arc<dyn Platform>,
        transport: Arc<dyn TelemetryTransport>,
    ) -> Self {
        let available = platform.available();
        let session = if available {
            Arc::new(SessionManager::resolve(Arc::clone(&platform)))
        } else {
            Arc::new(SessionManager::detached(Arc::clone(&platform)))
        };
        let active = options.enabled && available;
        let visible_since = active.then(|| platform.now());
        Self {
            options,
            active,
            platform,
            transport,
            session,
            queue: Arc::new(Mutex::new(Vec::new())),
            flush_wakeup: Arc::new(Notify::new()),
            page_state: Arc::new(Mutex::new(PageState {
                visible_since,
                ..PageState::default()
            })),
            metrics: Arc::new(TrackerMetrics::default()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    pub fn metrics(&self) -> &TrackerMetrics {
        &self.metrics
    }

    pub fn session_id(&self) -> Uuid {
        self.session.id()
    }

    pub fn pending_events(&self) -> usize {
        self.queue.lock().len()
    }

    /// Records an event. Never fails and never waits on the network;
    /// the sliding session expiry is re-armed as a side effect.
    pub fn track(&self, event_type: EventKind, action_data: serde_json::Value) {
        if !self.active {
            return;
        }
        let session_id = self.session.touch();
        let event = self.build_event(event_type, action_data, session_id);
        let pending = {
            let mut queue = self.queue.lock();
            queue.push(event);
            queue.len()
        };
        self.metrics.record_event();
        if self.options.debug {
            debug!("queued {} event, {} pending", event_type.as_str(), pending);
        }
        if pending >= self.options.batch_size {
            self.flush_wakeup.notify_one();
        }
    }

    /// Resolves when a full queue asks for an immediate flush.
    pub async fn flush_requested(&self) {
        self.flush_wakeup.notified().await;
    }

    /// Swaps the queue out and posts the batch. The swap is the only
    /// concurrency guard: overlapping flushes each own a disjoint
    /// batch, so an event is handed to the transport at most once.
    pub async fn flush(&self) -> FlushOutcome {
        let batch = self.take_batch();
        if batch.is_empty() {
            return FlushOutcome::Idle;
        }
        let count = batch.len();
        match self.transport.send_events(self.session.id(), &batch).await {
            Ok(()) => {
                self.metrics.record_batch(count);
                if self.options.debug {
                    debug!("delivered batch of {}", count);
                }
                FlushOutcome::Sent(count)
            }
            Err(err) => {
                self.metrics.record_flush_failure();
                match on_flush_failure(self.options.debug) {
                    FailureDisposition::Requeue => {
                        warn!("flush failed, requeueing {} events: {}", count, err);
                        self.requeue_front(batch);
                        self.metrics.record_requeued(count);
                        FlushOutcome::Requeued(count)
                    }
                    FailureDisposition::Drop => {
                        debug!("flush failed, dropping {} events: {}", count, err);
                        self.metrics.record_dropped(count);
                        FlushOutcome::Dropped(count)
                    }
                }
            }
        }
    }

    /// Folds a raw scroll measurement into the high-water depth.
    pub fn note_scroll(&self, scroll_top: f64, viewport_height: f64, content_height: f64) {
        if !self.active {
            return;
        }
        let depth = scroll_depth_percent(scroll_top, viewport_height, content_height);
        let mut page = self.page_state.lock();
        if depth > page.max_scroll_depth {
            page.max_scroll_depth = depth;
        }
    }

    /// Emits a scroll_depth event for every milestone newly covered by
    /// the high-water depth; each milestone fires once per page.
    pub fn sweep_scroll_milestones(&self) {
        if !self.active {
            return;
        }
        let newly = {
            let mut page = self.page_state.lock();
            let crossed = crossed_milestones(page.max_scroll_depth, &page.milestones);
            page.milestones.extend(crossed.iter().copied());
            crossed
        };
        for milestone in newly {
            self.track(EventKind::ScrollDepth, json!({ "depth": milestone }));
        }
    }

    pub fn page_hidden(&self) {
        if !self.active {
            return;
        }
        self.finish_engagement();
    }

    pub fn page_visible(&self) {
        if !self.active {
            return;
        }
        self.page_state.lock().visible_since = Some(self.platform.now());
    }

    /// Reports the nearest anchor or button on the click path as a
    /// link_click or button_click event.
    pub fn handle_click(&self, path: &[DomNode]) {
        if !self.active {
            return;
        }
        let page_url = self.platform.page().url;
        match classify_click(path, &page_url) {
            Some(ClickAction::Link { url, text, external }) => self.track(
                EventKind::LinkClick,
                json!({ "url": url, "text": text, "external": external }),
            ),
            Some(ClickAction::Button { id, text }) => {
                self.track(EventKind::ButtonClick, json!({ "id": id, "text": text }))
            }
            None => {}
        }
    }

    /// Final page accounting before teardown or navigation.
    pub fn finalize_page(&self) {
        if !self.active {
            return;
        }
        self.finish_engagement();
    }

    /// Reports the traffic source once per session; a cookie flag keeps
    /// later page loads from repeating it.
    pub fn report_source_once(&self) {
        if !self.active {
            return;
        }
        if self.platform.get_cookie(SOURCE_COOKIE).is_some() {
            return;
        }
        self.platform.set_cookie(SOURCE_COOKIE, "1", session_ttl());
        let page = self.platform.page();
        let user_agent = self.platform.user_agent();
        let report = SourceReport {
            session_id: self.session.id(),
            utm: extract_utm(&page.url),
            device_type: classify_device(&user_agent),
            landing_page: page.url,
            referrer: page.referrer,
        };
        self.metrics.record_source();
        let transport = Arc::clone(&self.transport);
        let debug_mode = self.options.debug;
        spawn_detached(async move {
            if let Err(err) = transport.send_source(&report).await {
                if debug_mode {
                    warn!("source report failed: {}", err);
                } else {
                    debug!("source report failed: {}", err);
                }
            }
        });
    }

    /// Fire-and-forget interest delivery on the side channel.
    pub(crate) fn send_interest(&self, signal: InterestSignal) {
        if !self.active {
            return;
        }
        self.metrics.record_interest();
        let transport = Arc::clone(&self.transport);
        let debug_mode = self.options.debug;
        spawn_detached(async move {
            if let Err(err) = transport.send_interest(&signal).await {
                if debug_mode {
                    warn!("interest signal failed: {}", err);
                } else {
                    debug!("interest signal failed: {}", err);
                }
            }
        });
    }

    fn build_event(
        &self,
        event_type: EventKind,
        action_data: serde_json::Value,
        session_id: Uuid,
    ) -> AnalyticsEvent {
        let page = self.platform.page();
        let user_agent = self.platform.user_agent();
        let viewport = self.platform.viewport();
        let screen = self.platform.screen();
        AnalyticsEvent {
            event_type,
            event_url: page.url,
            referrer_url: page.referrer,
            session_id,
            action_data,
            device_type: classify_device(&user_agent),
            browser: classify_browser(&user_agent),
            os: classify_os(&user_agent),
            context: EventContext {
                page_title: page.title,
                viewport_width: viewport.width,
                viewport_height: viewport.height,
                screen_width: screen.width,
                screen_height: screen.height,
                language: self.platform.language(),
                timezone: self.platform.timezone(),
            },
            timestamp: self.platform.now(),
        }
    }

    /// Closes the active visibility span. Spans under the noise floor
    /// are discarded; anything else becomes a time_on_page event
    /// carrying the high-water scroll depth.
    fn finish_engagement(&self) {
        let now = self.platform.now();
        let (elapsed_ms, max_depth) = {
            let mut page = self.page_state.lock();
            let Some(since) = page.visible_since.take() else {
                return;
            };
            ((now - since).num_milliseconds(), page.max_scroll_depth)
        };
        if elapsed_ms < MIN_TIME_ON_PAGE_MS {
            return;
        }
        let seconds = (elapsed_ms as f64 / 1000.0).round() as i64;
        self.track(
            EventKind::TimeOnPage,
            json!({ "time_seconds": seconds, "max_scroll_depth": max_depth }),
        );
    }

    fn take_batch(&self) -> Vec<AnalyticsEvent> {
        mem::take(&mut *self.queue.lock())
    }

    fn requeue_front(&self, mut batch: Vec<AnalyticsEvent>) {
        let mut queue = self.queue.lock();
        batch.append(&mut *queue);
        *queue = batch;
    }
}

/// Instrumentation must never surface into the host: when no runtime
/// is running the send is skipped.
fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        handle.spawn(future);
    }
}
