// Domain value objects

pub mod device;
pub mod event_kind;
pub mod price_range;

pub use device::*;
pub use event_kind::*;
pub use price_range::*;
