// Port Traits (Interfaces)
// Define what the domain needs from the embedding environment

pub mod platform;
pub mod transport;

pub use platform::*;
pub use transport::*;
