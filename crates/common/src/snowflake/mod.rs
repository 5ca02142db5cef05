//! Single-process 64-bit time-ordered id generation
//!
//! Ids pack four fields into one unsigned 64-bit integer:
//!
//! ```text
//! | 1 bit |     41 bits      |  5 bits    |  5 bits   |  12 bits  |
//! | sign  | timestamp offset | datacenter | worker    | sequence  |
//! ```
//!
//! The timestamp field counts milliseconds since a configurable epoch
//! (default 2022-01-01T00:00:00Z), giving roughly 69 years of headroom. The
//! datacenter and worker ids identify which node produced the id; the
//! sequence disambiguates ids minted within the same millisecond.
//!
//! A generator instance owns its `last_timestamp`/`sequence` state behind a
//! mutex, so ids from one instance are strictly increasing. Backward clock
//! jumps within a configurable tolerance are absorbed by waiting; larger
//! jumps surface as [`SnowflakeError::ClockMovedBackwards`].
//!
//! ```
//! use keystone_common::snowflake::SnowflakeGenerator;
//!
//! let generator = SnowflakeGenerator::new(1, 1).unwrap();
//! let id = generator.next_id().unwrap();
//! let parts = generator.parse(id);
//! assert_eq!(parts.datacenter_id, 1);
//! assert_eq!(parts.worker_id, 1);
//! ```

mod error;
mod generator;
mod layout;

pub use error::{SnowflakeError, SnowflakeResult};
pub use generator::SnowflakeGenerator;
pub use layout::{
    IdParts, DEFAULT_CLOCK_BACKWARD_TOLERANCE, DEFAULT_EPOCH_MS, MAX_DATACENTER_ID, MAX_SEQUENCE,
    MAX_TIMESTAMP_OFFSET, MAX_WORKER_ID,
};
