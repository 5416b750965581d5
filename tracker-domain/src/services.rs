// Pure domain services

pub mod agent;
pub mod clicks;
pub mod flush_policy;
pub mod scroll;
pub mod utm;

pub use agent::*;
pub use clicks::*;
pub use flush_policy::*;
pub use scroll::*;
pub use utm::*;
