pub mod context;
pub mod lifecycle;
mod loops;

pub use context::TrackerContext;
pub use lifecycle::{start, start_from_env, TrackerHandle};
