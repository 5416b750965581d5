// Tracker Application Layer

pub mod emitters;
pub mod error;
pub mod metrics;
pub mod session;
pub mod tracker;

pub use error::TrackerError;
pub use metrics::{MetricsSnapshot, TrackerMetrics};
pub use session::SessionManager;
pub use tracker::{FlushOutcome, Tracker};
