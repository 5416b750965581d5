// Scroll, visibility, click and unload behaviour, driven through the
// signal stream and the background loops.

use std::sync::Arc;
use std::time::Duration;

use tracker_bootstrap::{start, TrackerContext};
use tracker_domain::{
    AnalyticsEvent, DomNode, EventKind, InterestSignal, PageSignal, Platform, SourceReport,
    TelemetryTransport, TrackerOptions,
};
use tracker_infrastructure::{HeadlessPlatform, RecordingTransport};

const MOBILE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";

fn setup() -> (TrackerContext, Arc<HeadlessPlatform>, Arc<RecordingTransport>) {
    let platform = Arc::new(
        HeadlessPlatform::new()
            .with_page(
                "https://festa.example/profiles/44",
                "https://festa.example/",
                "Venue profile",
            )
            .with_user_agent(MOBILE_UA),
    );
    let transport = Arc::new(RecordingTransport::new());
    let context = TrackerContext::with_transport(
        TrackerOptions::default(),
        Arc::clone(&platform) as Arc<dyn Platform>,
        Arc::clone(&transport) as Arc<dyn TelemetryTransport>,
    );
    (context, platform, transport)
}

async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn scroll_milestones_fire_once_in_ascending_order() {
    let (context, _platform, transport) = setup();
    let tracker = context.tracker.clone();

    // jump straight to 80% of a 2000px page with an 800px viewport
    tracker.note_scroll(800.0, 800.0, 2_000.0);
    tracker.sweep_scroll_milestones();
    tracker.flush().await;

    let depths: Vec<i64> = transport.batches()[0]
        .1
        .iter()
        .filter(|event| event.event_type == EventKind::ScrollDepth)
        .map(|event| event.action_data["depth"].as_i64().unwrap())
        .collect();
    assert_eq!(depths, [25, 50, 75]);

    // sweeping again crosses nothing new
    tracker.sweep_scroll_milestones();
    assert_eq!(tracker.pending_events(), 0);

    // scrolling back up never lowers the high-water mark
    tracker.note_scroll(0.0, 800.0, 2_000.0);
    tracker.sweep_scroll_milestones();
    assert_eq!(tracker.pending_events(), 0);

    // the bottom of the page adds only the missing milestone
    tracker.note_scroll(1_200.0, 800.0, 2_000.0);
    tracker.sweep_scroll_milestones();
    tracker.flush().await;
    let batches = transport.batches();
    let last = &batches[1].1;
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].action_data["depth"], 100);
}

#[tokio::test(start_paused = true)]
async fn signals_drive_milestones_through_the_background_loops() {
    let (context, platform, transport) = setup();
    let handle = start(&context);

    platform.emit(PageSignal::Scrolled {
        scroll_top: 800.0,
        viewport_height: 800.0,
        content_height: 2_000.0,
    });
    tokio::time::sleep(Duration::from_millis(1_100)).await;
    settle().await;

    assert_eq!(handle.tracker().pending_events(), 3);
    handle.stop().await;
    assert_eq!(transport.sent_events(), 3);
}

#[tokio::test]
async fn short_visibility_spans_are_noise_and_long_ones_report() {
    let (context, platform, transport) = setup();
    let tracker = context.tracker.clone();

    // 4.9s of visible time stays under the floor
    platform.advance(chrono::Duration::milliseconds(4_900));
    tracker.page_hidden();
    assert_eq!(tracker.pending_events(), 0);

    // 6.4s rounds to 6 and carries the high-water scroll depth
    tracker.page_visible();
    platform.advance(chrono::Duration::milliseconds(6_400));
    tracker.note_scroll(600.0, 400.0, 2_000.0);
    tracker.page_hidden();
    assert_eq!(tracker.pending_events(), 1);
    tracker.flush().await;
    let event = &transport.batches()[0].1[0];
    assert_eq!(event.event_type, EventKind::TimeOnPage);
    assert_eq!(event.action_data["time_seconds"], 6);
    assert_eq!(event.action_data["max_scroll_depth"], 50);

    // hidden again without a fresh visible span reports nothing
    tracker.page_hidden();
    assert_eq!(tracker.pending_events(), 0);

    // exactly five seconds sits on the floor and reports
    tracker.page_visible();
    platform.advance(chrono::Duration::milliseconds(5_000));
    tracker.page_hidden();
    assert_eq!(tracker.pending_events(), 1);
    tracker.flush().await;
    let event = &transport.batches()[1].1[0];
    assert_eq!(event.action_data["time_seconds"], 5);
}

#[tokio::test]
async fn clicks_resolve_to_link_and_button_events() {
    let (context, platform, transport) = setup();
    let handle = start(&context);

    platform.emit(PageSignal::Clicked {
        path: vec![
            DomNode {
                tag: "span".to_string(),
                ..DomNode::default()
            },
            DomNode {
                tag: "a".to_string(),
                href: Some("https://maps.example.com/venue".to_string()),
                text: Some("Open map".to_string()),
                ..DomNode::default()
            },
        ],
    });
    platform.emit(PageSignal::Clicked {
        path: vec![DomNode {
            tag: "button".to_string(),
            id: Some("book-now".to_string()),
            text: Some("Book now".to_string()),
            ..DomNode::default()
        }],
    });
    platform.emit(PageSignal::Clicked {
        path: vec![DomNode {
            tag: "div".to_string(),
            ..DomNode::default()
        }],
    });
    settle().await;

    assert_eq!(handle.tracker().pending_events(), 2);
    handle.stop().await;

    let batches = transport.batches();
    let events = &batches[0].1;
    assert_eq!(events[0].event_type, EventKind::LinkClick);
    assert_eq!(events[0].action_data["url"], "https://maps.example.com/venue");
    assert_eq!(events[0].action_data["text"], "Open map");
    assert_eq!(events[0].action_data["external"], true);
    assert_eq!(events[1].event_type, EventKind::ButtonClick);
    assert_eq!(events[1].action_data["id"], "book-now");
    assert_eq!(events[1].action_data["text"], "Book now");
}

#[tokio::test]
async fn unload_runs_the_final_accounting_and_flush() {
    let (context, platform, transport) = setup();
    let handle = start(&context);
    let tracker = handle.tracker();

    tracker.track_page_view();
    platform.advance(chrono::Duration::seconds(12));
    platform.emit(PageSignal::Unloading);
    settle().await;

    assert_eq!(tracker.pending_events(), 0);
    let batches = transport.batches();
    assert_eq!(batches.len(), 1);
    let kinds: Vec<EventKind> = batches[0].1.iter().map(|event| event.event_type).collect();
    assert_eq!(kinds, [EventKind::PageView, EventKind::TimeOnPage]);
    assert_eq!(batches[0].1[1].action_data["time_seconds"], 12);

    handle.stop().await;
    // nothing is double-reported on stop
    assert_eq!(transport.batch_count(), 1);
}

#[tokio::test]
async fn stop_flushes_the_tail_and_reports_time_on_page() {
    let (context, platform, transport) = setup();
    let handle = start(&context);
    handle.tracker().track_page_view();
    platform.advance(chrono::Duration::seconds(7));
    handle.stop().await;

    assert_eq!(transport.batch_count(), 1);
    let events = &transport.batches()[0].1;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_type, EventKind::PageView);
    assert_eq!(events[1].event_type, EventKind::TimeOnPage);
    assert_eq!(events[1].action_data["time_seconds"], 7);
}

struct StallingTransport;

#[async_trait::async_trait]
impl TelemetryTransport for StallingTransport {
    async fn send_events(
        &self,
        _session_id: uuid::Uuid,
        _events: &[AnalyticsEvent],
    ) -> anyhow::Result<()> {
        std::future::pending().await
    }

    async fn send_source(&self, _report: &SourceReport) -> anyhow::Result<()> {
        Ok(())
    }

    async fn send_interest(&self, _signal: &InterestSignal) -> anyhow::Result<()> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn stop_gives_up_on_a_transport_that_never_answers() {
    let platform = Arc::new(HeadlessPlatform::new().with_user_agent(MOBILE_UA));
    let context = TrackerContext::with_transport(
        TrackerOptions::default(),
        Arc::clone(&platform) as Arc<dyn Platform>,
        Arc::new(StallingTransport),
    );
    let handle = start(&context);
    handle.tracker().track_page_view();

    // must come back once the grace period lapses
    handle.stop().await;
    assert_eq!(context.tracker.pending_events(), 0);
}
