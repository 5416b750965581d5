// Background loops
// Everything time- or signal-driven lives here, off the caller's path

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use tracker_application::Tracker;
use tracker_domain::PageSignal;

/// How often the scroll milestone set is reconciled.
const MILESTONE_POLL: Duration = Duration::from_secs(1);

/// Timer- and threshold-driven flushing. A full queue wakes this loop
/// through the tracker's notify handle so it never waits for the
/// timer.
pub(crate) async fn run_flush_loop(tracker: Tracker, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = interval(Duration::from_millis(tracker.options().batch_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick of an interval resolves immediately
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {}
            _ = tracker.flush_requested() => {}
        }
        if tracker.pending_events() > 0 {
            let outcome = tracker.flush().await;
            debug!("flush pass: {:?}", outcome);
        }
    }
}

pub(crate) async fn run_milestone_loop(tracker: Tracker, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = interval(MILESTONE_POLL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {}
        }
        tracker.sweep_scroll_milestones();
    }
}

pub(crate) async fn run_signal_loop(
    tracker: Tracker,
    mut signals: mpsc::UnboundedReceiver<PageSignal>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        let signal = tokio::select! {
            _ = shutdown.changed() => break,
            next = signals.recv() => match next {
                Some(signal) => signal,
                None => break,
            },
        };
        match signal {
            PageSignal::Scrolled {
                scroll_top,
                viewport_height,
                content_height,
            } => tracker.note_scroll(scroll_top, viewport_height, content_height),
            PageSignal::VisibilityChanged { hidden: true } => tracker.page_hidden(),
            PageSignal::VisibilityChanged { hidden: false } => tracker.page_visible(),
            PageSignal::Clicked { path } => tracker.handle_click(&path),
            PageSignal::Unloading => {
                tracker.finalize_page();
                let outcome = tracker.flush().await;
                debug!("unload flush: {:?}", outcome);
            }
        }
    }
}
