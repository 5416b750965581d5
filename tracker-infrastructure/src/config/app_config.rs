use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;
use url::Url;

use tracker_domain::{
    TrackerOptions, DEFAULT_BATCH_INTERVAL_MS, DEFAULT_BATCH_SIZE, DEFAULT_ENDPOINT,
};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub enabled: bool,
    pub debug: bool,
    pub batch_size: usize,
    pub batch_interval_ms: u64,
    pub endpoint: String,
}

impl Default for AppConfig {
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

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("TRACKER_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        let endpoint = self.endpoint.trim().trim_end_matches('/');
        self.endpoint = if endpoint.is_empty() {
            DEFAULT_ENDPOINT.to_string()
        } else {
            endpoint.to_string()
        };
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.endpoint).map_err(|err| anyhow!("invalid endpoint: {}", err))?;
        if self.batch_size == 0 {
            return Err(anyhow!("batch_size must be greater than 0"));
        }
        if self.batch_interval_ms < 100 {
            return Err(anyhow!("batch_interval_ms must be at least 100"));
        }
        Ok(())
    }

    pub fn to_tracker_options(&self) -> TrackerOptions {
        TrackerOptions {
            enabled: self.enabled,
            debug: self.debug,
            batch_size: self.batch_size,
            batch_interval_ms: self.batch_interval_ms,
            endpoint: self.endpoint.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("TRACKER_ENABLED") {
            self.enabled = value.parse().unwrap_or(self.enabled);
        }
        if let Ok(value) = env::var("TRACKER_DEBUG") {
            self.debug = value.parse().unwrap_or(self.debug);
        }
        if let Ok(value) = env::var("TRACKER_BATCH_SIZE") {
            self.batch_size = value.parse().unwrap_or(self.batch_size);
        }
        if let Ok(value) = env::var("TRACKER_BATCH_INTERVAL_MS") {
            self.batch_interval_ms = value.parse().unwrap_or(self.batch_interval_ms);
        }
        if let Ok(value) = env::var("TRACKER_ENDPOINT") {
            self.endpoint = value;
        }
    }
}
