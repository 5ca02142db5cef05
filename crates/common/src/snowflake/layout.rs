//! Bit layout of generated ids.
//!
//! Field widths are 41/5/5/12 (timestamp/datacenter/worker/sequence) with an
//! implicit zero sign bit at position 63. Every field is masked explicitly at
//! assembly and extraction, so encode/decode never depends on shift-overflow
//! semantics.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Bits reserved for the millisecond timestamp offset.
pub const TIMESTAMP_BITS: u32 = 41;
/// Bits reserved for the datacenter id.
pub const DATACENTER_ID_BITS: u32 = 5;
/// Bits reserved for the worker id.
pub const WORKER_ID_BITS: u32 = 5;
/// Bits reserved for the per-millisecond sequence.
pub const SEQUENCE_BITS: u32 = 12;

/// Largest representable timestamp offset (about 69 years of milliseconds).
pub const MAX_TIMESTAMP_OFFSET: u64 = (1 << TIMESTAMP_BITS) - 1;
/// Largest valid datacenter id.
pub const MAX_DATACENTER_ID: u64 = (1 << DATACENTER_ID_BITS) - 1;
/// Largest valid worker id.
pub const MAX_WORKER_ID: u64 = (1 << WORKER_ID_BITS) - 1;
/// Largest sequence value within one millisecond.
pub const MAX_SEQUENCE: u64 = (1 << SEQUENCE_BITS) - 1;

pub(crate) const WORKER_ID_SHIFT: u32 = SEQUENCE_BITS;
pub(crate) const DATACENTER_ID_SHIFT: u32 = SEQUENCE_BITS + WORKER_ID_BITS;
pub(crate) const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + WORKER_ID_BITS + DATACENTER_ID_BITS;

/// Default epoch: 2022-01-01T00:00:00Z, in milliseconds since the Unix
/// epoch.
pub const DEFAULT_EPOCH_MS: u64 = 1_640_995_200_000;

/// Default tolerance for backward clock jumps.
pub const DEFAULT_CLOCK_BACKWARD_TOLERANCE: Duration = Duration::from_millis(5000);

/// Pack the four fields into an id. Out-of-range inputs are masked to their
/// field width.
pub(crate) fn compose(
    timestamp_offset: u64,
    datacenter_id: u64,
    worker_id: u64,
    sequence: u64,
) -> u64 {
    ((timestamp_offset & MAX_TIMESTAMP_OFFSET) << TIMESTAMP_SHIFT)
        | ((datacenter_id & MAX_DATACENTER_ID) << DATACENTER_ID_SHIFT)
        | ((worker_id & MAX_WORKER_ID) << WORKER_ID_SHIFT)
        | (sequence & MAX_SEQUENCE)
}

/// Decoded view of an id.
///
/// Produced by [`IdParts::from_id`]; the decomposition is the pure inverse of
/// the packing and succeeds for any 64-bit input. It does not check that the
/// id came from a generator with matching node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParts {
    /// The raw id.
    pub id: u64,
    /// Absolute wall-clock milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// Datacenter id encoded in the id.
    pub datacenter_id: u64,
    /// Worker id encoded in the id.
    pub worker_id: u64,
    /// Sequence number within the id's millisecond.
    pub sequence: u64,
}

impl IdParts {
    /// Decompose `id` against the given epoch.
    pub fn from_id(id: u64, epoch_ms: u64) -> Self {
        let timestamp_offset = (id >> TIMESTAMP_SHIFT) & MAX_TIMESTAMP_OFFSET;
        Self {
            id,
            timestamp_ms: timestamp_offset + epoch_ms,
            datacenter_id: (id >> DATACENTER_ID_SHIFT) & MAX_DATACENTER_ID,
            worker_id: (id >> WORKER_ID_SHIFT) & MAX_WORKER_ID,
            sequence: id & MAX_SEQUENCE,
        }
    }

    /// The id's timestamp as a UTC datetime, when representable.
    pub fn datetime_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp_ms as i64)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for snowflake::layout.
    use super::*;

    /// Validates `compose` behavior for the round trip scenario.
    ///
    /// Assertions:
    /// - Confirms every field of the decomposed id equals its input.
    #[test]
    fn test_compose_decompose_round_trip() {
        let id = compose(123_456_789, 7, 19, 4000);
        let parts = IdParts::from_id(id, DEFAULT_EPOCH_MS);

        assert_eq!(parts.timestamp_ms, DEFAULT_EPOCH_MS + 123_456_789);
        assert_eq!(parts.datacenter_id, 7);
        assert_eq!(parts.worker_id, 19);
        assert_eq!(parts.sequence, 4000);
    }

    /// Validates `compose` behavior for the field masking scenario.
    ///
    /// Assertions:
    /// - Out-of-range field inputs are truncated to their bit width instead
    ///   of bleeding into neighbouring fields.
    #[test]
    fn test_compose_masks_fields() {
        let id = compose(0, MAX_DATACENTER_ID + 1, MAX_WORKER_ID + 1, MAX_SEQUENCE + 1);
        let parts = IdParts::from_id(id, 0);

        assert_eq!(parts.datacenter_id, 0);
        assert_eq!(parts.worker_id, 0);
        assert_eq!(parts.sequence, 0);
        assert_eq!(parts.timestamp_ms, 0);
    }

    /// Validates the sign bit stays zero for the whole supported time range.
    #[test]
    fn test_sign_bit_is_zero() {
        let id = compose(MAX_TIMESTAMP_OFFSET, MAX_DATACENTER_ID, MAX_WORKER_ID, MAX_SEQUENCE);
        assert_eq!(id >> 63, 0);
    }

    /// Validates `IdParts::from_id` behavior for arbitrary input.
    ///
    /// Assertions:
    /// - Decomposition succeeds for any 64-bit value; fields stay within
    ///   their ranges.
    #[test]
    fn test_decompose_arbitrary_input() {
        let parts = IdParts::from_id(u64::MAX, 0);

        assert!(parts.datacenter_id <= MAX_DATACENTER_ID);
        assert!(parts.worker_id <= MAX_WORKER_ID);
        assert!(parts.sequence <= MAX_SEQUENCE);
    }

    /// Validates `IdParts::datetime_utc` maps the default epoch correctly.
    #[test]
    fn test_datetime_utc() {
        let id = compose(0, 0, 0, 0);
        let parts = IdParts::from_id(id, DEFAULT_EPOCH_MS);
        let datetime = parts.datetime_utc().unwrap();

        assert_eq!(datetime.to_rfc3339(), "2022-01-01T00:00:00+00:00");
    }
}
