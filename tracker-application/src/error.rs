use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
