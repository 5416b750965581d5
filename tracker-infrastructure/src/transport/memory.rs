// Recording transport
// Captures outbound telemetry for inspection; batch delivery can be
// made to fail to exercise the drop and requeue paths

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use tracker_domain::{
    AnalyticsEvent, InterestSignal, SourceReport, TelemetryTransport,
};

#[derive(Default)]
pub struct RecordingTransport {
    batches: Mutex<Vec<(Uuid, Vec<AnalyticsEvent>)>>,
    sources: Mutex<Vec<SourceReport>>,
    interests: Mutex<Vec<InterestSignal>>,
    fail_events: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later send_events call fail until reset.
    pub fn fail_events(&self, fail: bool) {
        self.fail_events.store(fail, Ordering::Relaxed);
    }

    pub fn batches(&self) -> Vec<(Uuid, Vec<AnalyticsEvent>)> {
        self.batches.lock().clone()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().len()
    }

    pub fn sent_events(&self) -> usize {
        self.batches.lock().iter().map(|(_, events)| events.len()).sum()
    }

    pub fn sources(&self) -> Vec<SourceReport> {
        self.sources.lock().clone()
    }

    pub fn interests(&self) -> Vec<InterestSignal> {
        self.interests.lock().clone()
    }
}

#[async_trait]
impl TelemetryTransport for RecordingTransport {
    async fn send_events(&self, session_id: Uuid, events: &[AnalyticsEvent]) -> Result<()> {
        if self.fail_events.load(Ordering::Relaxed) {
            bail!("simulated ingest failure");
        }
        self.batches.lock().push((session_id, events.to_vec()));
        Ok(())
    }

    async fn send_source(&self, report: &SourceReport) -> Result<()> {
        self.sources.lock().push(report.clone());
        Ok(())
    }

    async fn send_interest(&self, signal: &InterestSignal) -> Result<()> {
        self.interests.lock().push(signal.clone());
        Ok(())
    }
}
