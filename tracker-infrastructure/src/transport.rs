pub mod http;
pub mod memory;

pub use http::*;
pub use memory::*;
