// HTTP transport
// Posts telemetry to the ingest API. The client carries no request
// timeout: a stalled flush stays pending without ever blocking
// recording, and delivery gives up only when the server answers.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use uuid::Uuid;

use tracker_domain::{
    AnalyticsEvent, EventEnvelope, InterestSignal, SourceReport, TelemetryTransport,
};

const EVENTS_PATH: &str = "/api/analytics/events";
const SOURCE_PATH: &str = "/api/analytics/source";
const INTEREST_PATH: &str = "/api/analytics/interest";

pub const SESSION_HEADER: &str = "X-Session-ID";

pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}

#[async_trait]
impl TelemetryTransport for HttpTransport {
    async fn send_events(&self, session_id: Uuid, events: &[AnalyticsEvent]) -> Result<()> {
        let envelope = EventEnvelope {
            events: events.to_vec(),
        };
        self.client
            .post(self.url(EVENTS_PATH))
            .header(SESSION_HEADER, session_id.to_string())
            .json(&envelope)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn send_source(&self, report: &SourceReport) -> Result<()> {
        self.client
            .post(self.url(SOURCE_PATH))
            .header(SESSION_HEADER, report.session_id.to_string())
            .json(report)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn send_interest(&self, signal: &InterestSignal) -> Result<()> {
        self.client
            .post(self.url(INTEREST_PATH))
            .header(SESSION_HEADER, signal.session_id.to_string())
            .json(signal)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
