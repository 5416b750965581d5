pub mod config;
pub mod platform;
pub mod transport;

pub use config::*;
pub use platform::*;
pub use transport::*;
