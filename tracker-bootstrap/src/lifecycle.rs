// Tracker lifecycle
// start() wires the background loops onto an assembled tracker,
// stop() drains them with a bounded grace period

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use tracker_application::{Tracker, TrackerError};
use tracker_domain::Platform;

use crate::context::TrackerContext;
use crate::loops::{run_flush_loop, run_milestone_loop, run_signal_loop};

/// Grace given to in-flight work on shutdown.
const STOP_GRACE: Duration = Duration::from_secs(2);

pub struct TrackerHandle {
    tracker: Tracker,
    shutdown_tx: Option<watch::Sender<bool>>,
    workers: Vec<JoinHandle<()>>,
}

impl TrackerHandle {
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Stops the loops, runs the final page accounting and flushes
    /// whatever is still queued. A transport that never answers cannot
    /// wedge shutdown: the closing flush and the worker joins are all
    /// bounded by the grace period.
    pub async fn stop(mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(true);
        }
        self.tracker.finalize_page();
        if self.tracker.pending_events() > 0
            && timeout(STOP_GRACE, self.tracker.flush()).await.is_err()
        {
            warn!("closing flush did not finish within the grace period");
        }
        for mut worker in self.workers.drain(..) {
            if timeout(STOP_GRACE, &mut worker).await.is_err() {
                worker.abort();
            }
        }
        info!(
            "tracker stopped, metrics: {:?}",
            self.tracker.metrics().snapshot()
        );
    }
}

/// Spawns the background machinery for an assembled tracker. An
/// inactive tracker gets a handle with no workers and no listeners.
pub fn start(context: &TrackerContext) -> TrackerHandle {
    let tracker = context.tracker.clone();
    if !tracker.is_active() {
        debug!("tracker inactive, no listeners or loops started");
        return TrackerHandle {
            tracker,
            shutdown_tx: None,
            workers: Vec::new(),
        };
    }

    tracker.report_source_once();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut workers = Vec::new();
    workers.push(tokio::spawn(run_flush_loop(
        tracker.clone(),
        shutdown_rx.clone(),
    )));
    workers.push(tokio::spawn(run_milestone_loop(
        tracker.clone(),
        shutdown_rx.clone(),
    )));
    if let Some(signals) = context.platform.take_signals() {
        workers.push(tokio::spawn(run_signal_loop(
            tracker.clone(),
            signals,
            shutdown_rx,
        )));
    }

    info!(
        "tracker started, batch_size {} interval {}ms",
        tracker.options().batch_size,
        tracker.options().batch_interval_ms
    );
    TrackerHandle {
        tracker,
        shutdown_tx: Some(shutdown_tx),
        workers,
    }
}

/// One-call assembly from the ambient configuration.
pub async fn start_from_env(platform: Arc<dyn Platform>) -> Result<TrackerHandle, TrackerError> {
    let context = TrackerContext::new(platform).await?;
    Ok(start(&context))
}
