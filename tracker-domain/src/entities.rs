// Domain entities

pub mod event;
pub mod interest;
pub mod options;
pub mod session;
pub mod source;

pub use event::*;
pub use interest::*;
pub use options::*;
pub use session::*;
pub use source::*;
