//! The id generator itself.

use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rand::Rng;
use tracing::{debug, warn};

use super::error::{SnowflakeError, SnowflakeResult};
use super::layout::{
    compose, IdParts, DEFAULT_CLOCK_BACKWARD_TOLERANCE, DEFAULT_EPOCH_MS, MAX_DATACENTER_ID,
    MAX_SEQUENCE, MAX_WORKER_ID,
};
use crate::time::{Clock, SystemClock};

/// Extra time granted to a within-tolerance backward jump before the wait
/// gives up. Keeps a wedged clock from blocking callers forever.
const RECOVERY_SLACK: Duration = Duration::from_secs(1);

/// Mutable generator state. Both fields are read and written as one unit
/// inside a single critical section; splitting them into independent atomics
/// would let two threads observe different `now` values and mint colliding
/// ids.
#[derive(Debug)]
struct GeneratorState {
    last_timestamp_ms: u64,
    sequence: u64,
}

/// Single-process monotonic 64-bit id generator.
///
/// Node identity (datacenter + worker) is fixed at construction; each call to
/// [`next_id`](Self::next_id) mints a fresh id. Instances are independent —
/// two generators never share counters, so tests (and multi-tenant hosts)
/// can create as many as they like.
///
/// # Blocking
///
/// `next_id` is not guaranteed O(1): it spins briefly when the
/// per-millisecond sequence overflows, and blocks for up to the configured
/// tolerance when the wall clock jumps backwards.
///
/// # Example
/// ```
/// use keystone_common::snowflake::SnowflakeGenerator;
///
/// let generator = SnowflakeGenerator::new(0, 0).unwrap();
/// let a = generator.next_id().unwrap();
/// let b = generator.next_id().unwrap();
/// assert!(b > a);
/// ```
#[derive(Debug)]
pub struct SnowflakeGenerator<C = SystemClock>
where
    C: Clock,
{
    datacenter_id: u64,
    worker_id: u64,
    epoch_ms: u64,
    tolerance: Duration,
    state: Mutex<GeneratorState>,
    clock: C,
}

impl SnowflakeGenerator<SystemClock> {
    /// Create a generator with the default epoch and clock-backward
    /// tolerance.
    ///
    /// # Errors
    /// Returns an out-of-range error if either id exceeds its 5-bit field.
    pub fn new(datacenter_id: u64, worker_id: u64) -> SnowflakeResult<Self> {
        Self::with_clock(
            datacenter_id,
            worker_id,
            DEFAULT_EPOCH_MS,
            DEFAULT_CLOCK_BACKWARD_TOLERANCE,
            SystemClock,
        )
    }

    /// Create a generator with a randomly assigned worker id.
    ///
    /// Useful when no worker-id registry exists. Collisions between nodes
    /// are possible with random assignment; prefer [`new`](Self::new) with a
    /// managed id where uniqueness across processes matters.
    pub fn with_random_worker(datacenter_id: u64) -> SnowflakeResult<Self> {
        let worker_id = rand::thread_rng().gen_range(0..=MAX_WORKER_ID);
        Self::new(datacenter_id, worker_id)
    }
}

impl<C> SnowflakeGenerator<C>
where
    C: Clock,
{
    /// Create a fully configured generator.
    ///
    /// `epoch_ms` is the instant the timestamp field counts from, in
    /// milliseconds since the Unix epoch; `tolerance` bounds how large a
    /// backward clock jump is absorbed by waiting.
    ///
    /// # Errors
    /// - `DatacenterIdOutOfRange` / `WorkerIdOutOfRange` when an id exceeds
    ///   its 5-bit field
    /// - `EpochAheadOfClock` when `epoch_ms` lies in the future, which would
    ///   make the timestamp offset negative
    pub fn with_clock(
        datacenter_id: u64,
        worker_id: u64,
        epoch_ms: u64,
        tolerance: Duration,
        clock: C,
    ) -> SnowflakeResult<Self> {
        if datacenter_id > MAX_DATACENTER_ID {
            return Err(SnowflakeError::DatacenterIdOutOfRange(datacenter_id));
        }
        if worker_id > MAX_WORKER_ID {
            return Err(SnowflakeError::WorkerIdOutOfRange(worker_id));
        }
        let now_ms = clock.millis_since_epoch();
        if epoch_ms > now_ms {
            return Err(SnowflakeError::EpochAheadOfClock { epoch_ms, now_ms });
        }

        Ok(Self {
            datacenter_id,
            worker_id,
            epoch_ms,
            tolerance,
            // Starting at the epoch makes "clock below epoch" just another
            // backward jump, handled by the regular recovery path.
            state: Mutex::new(GeneratorState { last_timestamp_ms: epoch_ms, sequence: 0 }),
            clock,
        })
    }

    /// Mint the next id.
    ///
    /// Ids from one instance are strictly increasing. Within a tolerated
    /// backward clock jump the call blocks until the clock catches up; past
    /// the tolerance it fails with
    /// [`ClockMovedBackwards`](SnowflakeError::ClockMovedBackwards), and the
    /// caller decides what to do — the generator does not retry.
    pub fn next_id(&self) -> SnowflakeResult<u64> {
        let mut state = self.state.lock();
        let mut now = self.clock.millis_since_epoch();

        if now < state.last_timestamp_ms {
            now = self.wait_for_clock_recovery(state.last_timestamp_ms, now)?;
        }

        if now == state.last_timestamp_ms {
            state.sequence = (state.sequence + 1) & MAX_SEQUENCE;
            if state.sequence == 0 {
                // Sequence exhausted within this millisecond.
                now = self.wait_for_next_millis(state.last_timestamp_ms);
            }
        } else {
            state.sequence = 0;
        }
        state.last_timestamp_ms = now;

        Ok(compose(now - self.epoch_ms, self.datacenter_id, self.worker_id, state.sequence))
    }

    /// Mint `count` ids in one call.
    ///
    /// # Errors
    /// `EmptyBatch` when `count` is zero; otherwise any error `next_id` can
    /// produce.
    pub fn next_ids(&self, count: usize) -> SnowflakeResult<Vec<u64>> {
        if count == 0 {
            return Err(SnowflakeError::EmptyBatch);
        }
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            ids.push(self.next_id()?);
        }
        Ok(ids)
    }

    /// Decompose an id against this generator's epoch.
    ///
    /// Always succeeds; does not validate that the id was produced by a
    /// generator with matching node identity.
    pub fn parse(&self, id: u64) -> IdParts {
        IdParts::from_id(id, self.epoch_ms)
    }

    /// Datacenter id encoded into every generated id.
    pub fn datacenter_id(&self) -> u64 {
        self.datacenter_id
    }

    /// Worker id encoded into every generated id.
    pub fn worker_id(&self) -> u64 {
        self.worker_id
    }

    /// Epoch the timestamp field counts from, in Unix milliseconds.
    pub fn epoch_ms(&self) -> u64 {
        self.epoch_ms
    }

    /// Handle a backward clock jump.
    ///
    /// Within tolerance, poll until the clock catches back up to `last_ms`,
    /// bounded by the tolerance plus a fixed slack so a clock that never
    /// recovers turns into an error instead of an indefinite block. Beyond
    /// tolerance, fail immediately.
    #[cold]
    fn wait_for_clock_recovery(&self, last_ms: u64, now_ms: u64) -> SnowflakeResult<u64> {
        let backward_ms = last_ms - now_ms;
        let tolerance_ms = self.tolerance.as_millis() as u64;
        if backward_ms > tolerance_ms {
            warn!(backward_ms, tolerance_ms, "clock moved backwards beyond tolerance");
            return Err(SnowflakeError::ClockMovedBackwards { backward_ms, tolerance_ms });
        }

        debug!(backward_ms, "clock moved backwards within tolerance, waiting for recovery");
        let deadline = Instant::now() + self.tolerance + RECOVERY_SLACK;
        loop {
            let current = self.clock.millis_since_epoch();
            if current >= last_ms {
                return Ok(current);
            }
            if Instant::now() >= deadline {
                return Err(SnowflakeError::ClockMovedBackwards {
                    backward_ms: last_ms - current,
                    tolerance_ms,
                });
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    /// Busy-wait until the clock reads past `last_ms`.
    fn wait_for_next_millis(&self, last_ms: u64) -> u64 {
        let mut now = self.clock.millis_since_epoch();
        while now <= last_ms {
            std::hint::spin_loop();
            now = self.clock.millis_since_epoch();
        }
        now
    }
}
