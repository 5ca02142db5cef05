//! Conversion helpers: Base62 encoding and string shaping.

pub mod base62;
pub mod strings;

pub use base62::{Base62, Base62Error};
