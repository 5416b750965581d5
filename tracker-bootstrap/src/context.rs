use std::sync::Arc;

use tracker_application::{Tracker, TrackerError};
use tracker_domain::{Platform, TelemetryTransport, TrackerOptions};
use tracker_infrastructure::{AppConfig, HttpTransport};

pub struct TrackerContext {
    pub tracker: Tracker,
    pub platform: Arc<dyn Platform>,
}

impl std::fmt::Debug for TrackerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerContext").finish_non_exhaustive()
    }
}

impl TrackerContext {
    /// Assembles the tracker from the ambient configuration: a
    /// config.toml next to the host plus TRACKER_* env overrides.
    pub async fn new(platform: Arc<dyn Platform>) -> Result<Self, TrackerError> {
        let config = AppConfig::load().await?;
        Self::with_options(config.to_tracker_options(), platform)
    }

    /// Assembles the tracker for a host that carries its own options.
    pub fn with_options(
        options: TrackerOptions,
        platform: Arc<dyn Platform>,
    ) -> Result<Self, TrackerError> {
        validate_options(&options)?;
        let transport: Arc<dyn TelemetryTransport> =
            Arc::new(HttpTransport::new(options.endpoint.clone()));
        Ok(Self::with_transport(options, platform, transport))
    }

    /// Raw assembly with a caller-provided transport.
    pub fn with_transport(
        options: TrackerOptions,
        platform: Arc<dyn Platform>,
        transport: Arc<dyn TelemetryTransport>,
    ) -> Self {
        let tracker = Tracker::new(options, Arc::clone(&platform), transport);
        Self { tracker, platform }
    }
}

fn validate_options(options: &TrackerOptions) -> Result<(), TrackerError> {
    if options.batch_size == 0 {
        return Err(TrackerError::InvalidConfig(
            "batch_size must be greater than 0".to_string(),
        ));
    }
    if options.batch_interval_ms < 100 {
        return Err(TrackerError::InvalidConfig(
            "batch_interval_ms must be at least 100".to_string(),
        ));
    }
    Ok(())
}
