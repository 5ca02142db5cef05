//! Time utilities: clock abstraction and wall-clock formatting helpers.

pub mod clock;
pub mod format;

pub use clock::{Clock, MockClock, SystemClock};
