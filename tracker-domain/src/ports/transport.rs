// Transport port
// Delivery of batches, source reports and interest signals to the
// ingest API

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{AnalyticsEvent, InterestSignal, SourceReport};

#[async_trait]
pub trait TelemetryTransport: Send + Sync {
    async fn send_events(&self, session_id: Uuid, events: &[AnalyticsEvent]) -> anyhow::Result<()>;

    async fn send_source(&self, report: &SourceReport) -> anyhow::Result<()>;

    async fn send_interest(&self, signal: &InterestSignal) -> anyhow::Result<()>;
}
