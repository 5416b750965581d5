// Tracker runtime options

use serde::{Deserialize, Serialize};

pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_BATCH_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerOptions {
    /// Master switch. A disabled tracker records nothing and never
    /// touches the network.
    pub enabled: bool,
    /// Debug mode keeps failed batches for retry and logs verbosely.
    pub debug: bool,
    /// Queue length that triggers an immediate flush.
    pub batch_size: usize,
    /// Interval of the timed flush cycle.
    pub batch_interval_ms: u64,
    /// Base URL of the ingest API.
    pub endpoint: String,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_interval_ms: DEFAULT_BATCH_INTERVAL_MS,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}
