// Analytics event entity
// One immutable record per observed user action

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::{BrowserFamily, DeviceClass, EventKind, OsFamily};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub event_type: EventKind,
    pub event_url: String,
    pub referrer_url: String,
    pub session_id: Uuid,
    pub action_data: serde_json::Value,
    pub device_type: DeviceClass,
    pub browser: BrowserFamily,
    pub os: OsFamily,
    pub context: EventContext,
    pub timestamp: DateTime<Utc>,
}

/// Page and client state captured alongside every event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventContext {
    pub page_title: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub screen_width: u32,
    pub screen_height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Wire body of the batched ingest POST.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub events: Vec<AnalyticsEvent>,
}
