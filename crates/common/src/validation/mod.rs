//! Input validation: compiled field patterns and the Luhn checksum.

pub mod luhn;
pub mod patterns;

pub use patterns::ValidationPattern;
