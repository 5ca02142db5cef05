//! Error types for id generation.

use thiserror::Error;

/// Result alias for id generation operations.
pub type SnowflakeResult<T> = Result<T, SnowflakeError>;

/// All failure modes of the id generator.
///
/// Construction failures (`DatacenterIdOutOfRange`, `WorkerIdOutOfRange`,
/// `EpochAheadOfClock`) are configuration errors: fix the arguments before
/// retrying. `ClockMovedBackwards` is a call-time condition the generator
/// does not retry on its own — the caller decides whether to fail the
/// request, alert, or fall back to another id source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnowflakeError {
    /// Datacenter id outside the 5-bit field.
    #[error("datacenter id {0} must be in 0..=31")]
    DatacenterIdOutOfRange(u64),

    /// Worker id outside the 5-bit field.
    #[error("worker id {0} must be in 0..=31")]
    WorkerIdOutOfRange(u64),

    /// The configured epoch lies in the future, which would make the
    /// timestamp offset negative.
    #[error("epoch {epoch_ms}ms is ahead of the current clock {now_ms}ms")]
    EpochAheadOfClock { epoch_ms: u64, now_ms: u64 },

    /// The wall clock regressed past the configured tolerance, or failed to
    /// recover within it.
    #[error("clock moved backwards by {backward_ms}ms (tolerance {tolerance_ms}ms)")]
    ClockMovedBackwards { backward_ms: u64, tolerance_ms: u64 },

    /// Batch generation was asked for zero ids.
    #[error("batch size must be at least 1")]
    EmptyBatch,
}
