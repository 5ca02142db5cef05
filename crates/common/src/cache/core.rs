//! Core cache implementation
//!
//! A fixed-capacity map from keys to values where every entry carries its own
//! expiry deadline. Reads run concurrently under a shared lock; structural
//! changes (inserts, removals, lazy expiry, eviction) take the exclusive
//! lock. Recency is tracked with per-entry stamps drawn from a shared ticket
//! so a read can refresh an entry's position without blocking other readers.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::config::CacheConfig;
use super::stats::{CacheStats, MetricsCollector};
use crate::time::{Clock, SystemClock};

/// Caps pathological TTLs so deadline arithmetic cannot overflow.
const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 86_400);

/// Entry stored in the cache.
///
/// The recency stamp lives in an atomic so a successful read can refresh it
/// while holding only the shared lock.
#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
    last_used: AtomicU64,
}

impl<V> CacheEntry<V> {
    /// An entry is logically dead once `now` is strictly past its deadline,
    /// regardless of its recency position.
    fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    fn touch(&self, stamp: u64) {
        self.last_used.store(stamp, Ordering::Relaxed);
    }
}

/// Internal storage for cache entries
#[derive(Debug)]
struct CacheStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K, V> CacheStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    fn with_capacity(capacity: usize) -> Self {
        Self { entries: HashMap::with_capacity(capacity) }
    }
}

/// Thread-safe bounded cache with per-entry TTL and LRU eviction
///
/// # Type Parameters
/// - `K`: Key type (must be `Eq + Hash + Clone`)
/// - `V`: Value type (must be `Clone`)
/// - `C`: Clock type for time-based operations (defaults to [`SystemClock`])
///
/// # Locking
///
/// Reads and writes are mutually exclusive; reads proceed concurrently with
/// each other. A read that observes an expired entry upgrades to the write
/// lock to delete it. The upgrade is not atomic — the shared lock is released
/// before the exclusive lock is acquired — so the expiry check is repeated
/// after the upgrade: another thread may have deleted, replaced, or refreshed
/// the key in the gap.
///
/// # Example
/// ```
/// use keystone_common::cache::{CacheConfig, TtlLruCache};
///
/// let cache: TtlLruCache<String, i32> =
///     TtlLruCache::new(CacheConfig::try_new(100).unwrap());
/// cache.put("key".to_string(), 42);
/// assert_eq!(cache.get(&"key".to_string()), Some(42));
/// ```
pub struct TtlLruCache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    storage: Arc<RwLock<CacheStorage<K, V>>>,
    config: CacheConfig,
    metrics: MetricsCollector,
    /// Monotonic ticket; each access draws a fresh stamp, so stamps observed
    /// by non-overlapping operations are ordered like the operations.
    ticket: Arc<AtomicU64>,
    clock: C,
}

impl<K, V> TtlLruCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new cache with the given configuration using the system
    /// clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<K, V, C> TtlLruCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// Create a new cache with a custom clock (useful for testing).
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        let capacity = config.capacity.get();
        Self {
            storage: Arc::new(RwLock::new(CacheStorage::with_capacity(capacity))),
            config,
            metrics: MetricsCollector::new(),
            ticket: Arc::new(AtomicU64::new(0)),
            clock,
        }
    }

    /// Insert or replace the entry for `key` with the configured default TTL.
    ///
    /// See [`put_with_ttl`](Self::put_with_ttl).
    pub fn put(&self, key: K, value: V) {
        self.put_with_ttl(key, value, self.config.default_ttl);
    }

    /// Insert or replace the entry for `key`, expiring `ttl` from now.
    ///
    /// The entry becomes the most recently used. Inserting a *new* key when
    /// the cache is full evicts the least-recently-used entry — chosen by
    /// recency alone, whether or not some other entry has already expired.
    /// Overwriting an existing key never evicts. A zero TTL is permitted and
    /// makes the entry dead on the next read after any clock advance.
    pub fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let ttl = ttl.min(MAX_TTL);
        let mut storage = self.storage.write();

        if storage.entries.len() >= self.config.capacity.get()
            && !storage.entries.contains_key(&key)
        {
            self.evict_lru(&mut storage);
        }

        let entry = CacheEntry {
            value,
            expires_at: self.clock.now() + ttl,
            last_used: AtomicU64::new(self.next_stamp()),
        };
        storage.entries.insert(key, entry);

        if self.config.track_metrics {
            self.metrics.record_insert();
        }
    }

    /// Get the value for `key`, refreshing its recency.
    ///
    /// Returns `None` when the key is absent or its entry has expired; the
    /// two cases are indistinguishable to the caller. An entry observed
    /// expired is removed before returning, so its capacity slot is reclaimed
    /// immediately rather than at the next eviction.
    pub fn get(&self, key: &K) -> Option<V> {
        {
            let storage = self.storage.read();
            match storage.entries.get(key) {
                None => {
                    self.record_miss();
                    return None;
                }
                Some(entry) => {
                    if !entry.is_expired(self.clock.now()) {
                        entry.touch(self.next_stamp());
                        let value = entry.value.clone();
                        self.record_hit();
                        return Some(value);
                    }
                }
            }
            // Observed expired under the shared lock; fall through to the
            // exclusive path to delete it.
        }

        // The upgrade is not atomic: between releasing the shared lock and
        // acquiring the exclusive one, another thread may have removed,
        // replaced, or refreshed this key. Re-check everything.
        let mut storage = self.storage.write();
        let now = self.clock.now();
        match storage.entries.get(key) {
            Some(entry) if entry.is_expired(now) => {}
            Some(entry) => {
                // Refreshed by a concurrent put in the upgrade gap.
                entry.touch(self.next_stamp());
                let value = entry.value.clone();
                self.record_hit();
                return Some(value);
            }
            None => {
                self.record_miss();
                return None;
            }
        }

        storage.entries.remove(key);
        trace!("removed expired entry during get");
        if self.config.track_metrics {
            self.metrics.record_expiration();
        }
        self.record_miss();
        None
    }

    /// Get the value for `key`, or `default` when absent or expired.
    ///
    /// Convenience wrapper over [`get`](Self::get) for callers that follow
    /// the default-on-miss convention.
    pub fn get_or(&self, key: &K, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    /// Delete the entry for `key` if present; no-op otherwise.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut storage = self.storage.write();
        storage.entries.remove(key).map(|entry| entry.value)
    }

    /// Remove all entries, keeping the configured capacity.
    pub fn clear(&self) {
        let mut storage = self.storage.write();
        storage.entries.clear();
    }

    /// Current number of entries, expired-but-unobserved ones included.
    pub fn len(&self) -> usize {
        self.storage.read().entries.len()
    }

    /// Check whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries the cache will hold.
    pub fn capacity(&self) -> usize {
        self.config.capacity.get()
    }

    /// Get a snapshot of cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.len(), self.capacity())
    }

    /// Evict the entry with the smallest recency stamp.
    ///
    /// The scan is bounded by the configured capacity and only runs when an
    /// insert actually has to make room.
    fn evict_lru(&self, storage: &mut CacheStorage<K, V>) {
        let victim = storage
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used.load(Ordering::Relaxed))
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            storage.entries.remove(&key);
            debug!("evicted least-recently-used entry");
            if self.config.track_metrics {
                self.metrics.record_eviction();
            }
        }
    }

    fn next_stamp(&self) -> u64 {
        self.ticket.fetch_add(1, Ordering::Relaxed)
    }

    fn record_hit(&self) {
        if self.config.track_metrics {
            self.metrics.record_hit();
        }
    }

    fn record_miss(&self) {
        if self.config.track_metrics {
            self.metrics.record_miss();
        }
    }
}

impl<K, V, C> Clone for TtlLruCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: self.config.clone(),
            metrics: self.metrics.clone(),
            ticket: Arc::clone(&self.ticket),
            clock: self.clock.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for cache::core.
    use std::thread;

    use super::*;
    use crate::time::MockClock;

    fn cache_with_clock(capacity: usize, clock: MockClock) -> TtlLruCache<String, i32, MockClock> {
        let config =
            CacheConfig::builder(std::num::NonZeroUsize::new(capacity).unwrap())
                .track_metrics(true)
                .build();
        TtlLruCache::with_clock(config, clock)
    }

    /// Validates `TtlLruCache::new` behavior for the empty cache scenario.
    ///
    /// Assertions:
    /// - Confirms `cache.len()` equals `0`.
    /// - Ensures `cache.is_empty()` evaluates to true.
    #[test]
    fn test_cache_new() {
        let cache: TtlLruCache<String, i32> =
            TtlLruCache::new(CacheConfig::try_new(10).unwrap());
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 10);
    }

    /// Validates `TtlLruCache::new` behavior for the put and get scenario.
    ///
    /// Assertions:
    /// - Confirms `cache.get(&"key1")` equals `Some(42)`.
    /// - Confirms `cache.get(&"key3")` equals `None`.
    /// - Confirms `cache.len()` equals `2`.
    #[test]
    fn test_cache_put_and_get() {
        let cache: TtlLruCache<String, i32> =
            TtlLruCache::new(CacheConfig::try_new(10).unwrap());

        cache.put("key1".to_string(), 42);
        cache.put("key2".to_string(), 84);

        assert_eq!(cache.get(&"key1".to_string()), Some(42));
        assert_eq!(cache.get(&"key2".to_string()), Some(84));
        assert_eq!(cache.get(&"key3".to_string()), None);
        assert_eq!(cache.len(), 2);
    }

    /// Validates `TtlLruCache::new` behavior for the overwrite scenario.
    ///
    /// Assertions:
    /// - Confirms the second `put` replaces the value without growing the
    ///   cache.
    #[test]
    fn test_cache_overwrite_existing() {
        let cache: TtlLruCache<String, i32> =
            TtlLruCache::new(CacheConfig::try_new(10).unwrap());

        cache.put("key".to_string(), 42);
        cache.put("key".to_string(), 84);

        assert_eq!(cache.get(&"key".to_string()), Some(84));
        assert_eq!(cache.len(), 1);
    }

    /// Validates `TtlLruCache::new` behavior for the remove scenario.
    ///
    /// Assertions:
    /// - Confirms `removed` equals `Some(42)`.
    /// - Confirms removing an absent key equals `None`.
    #[test]
    fn test_cache_remove() {
        let cache: TtlLruCache<String, i32> =
            TtlLruCache::new(CacheConfig::try_new(10).unwrap());

        cache.put("key".to_string(), 42);
        let removed = cache.remove(&"key".to_string());
        assert_eq!(removed, Some(42));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&"key".to_string()), None);

        // Removing again is a no-op, not an error.
        assert_eq!(cache.remove(&"key".to_string()), None);
    }

    /// Validates the capacity invariant: `len() <= capacity` after every
    /// operation in an insert-only sequence.
    #[test]
    fn test_capacity_invariant() {
        let cache: TtlLruCache<String, i32> =
            TtlLruCache::new(CacheConfig::try_new(3).unwrap());

        for i in 0..10 {
            cache.put(format!("key{i}"), i);
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.len(), 3);
    }

    /// Validates recency eviction: inserting `capacity + 1` distinct keys
    /// without intervening reads evicts exactly the first one.
    #[test]
    fn test_lru_eviction_order() {
        let cache: TtlLruCache<String, i32> =
            TtlLruCache::new(CacheConfig::try_new(2).unwrap());

        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        cache.put("c".to_string(), 3); // evicts "a"

        assert_eq!(cache.get(&"a".to_string()), None);
        assert_eq!(cache.get(&"b".to_string()), Some(2));
        assert_eq!(cache.get(&"c".to_string()), Some(3));
        assert_eq!(cache.len(), 2);
    }

    /// Validates recency refresh: a read refreshes an entry so the other one
    /// is evicted instead.
    ///
    /// Assertions:
    /// - `put(a)`, `put(b)`, `get(a)`, `put(c)` evicts `b`, not `a`.
    #[test]
    fn test_lru_read_refreshes_recency() {
        let cache: TtlLruCache<String, i32> =
            TtlLruCache::new(CacheConfig::try_new(2).unwrap());

        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        assert_eq!(cache.get(&"a".to_string()), Some(1));
        cache.put("c".to_string(), 3); // evicts "b"

        assert_eq!(cache.get(&"a".to_string()), Some(1));
        assert_eq!(cache.get(&"b".to_string()), None);
        assert_eq!(cache.get(&"c".to_string()), Some(3));
    }

    /// Validates overwriting a key at capacity evicts nothing.
    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let clock = MockClock::new();
        let cache = cache_with_clock(2, clock);

        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        cache.put("a".to_string(), 10); // overwrite, no eviction

        assert_eq!(cache.get(&"a".to_string()), Some(10));
        assert_eq!(cache.get(&"b".to_string()), Some(2));
        assert_eq!(cache.stats().evictions, 0);
    }

    /// Validates `MockClock::new` behavior for the TTL expiry scenario.
    ///
    /// Assertions:
    /// - A zero-TTL entry is returned before any clock advance.
    /// - After the clock advances past the deadline the entry is gone.
    #[test]
    fn test_ttl_expiry() {
        let clock = MockClock::new();
        let cache = cache_with_clock(10, clock.clone());

        cache.put_with_ttl("key".to_string(), 42, Duration::ZERO);
        // Not yet strictly past the deadline.
        assert_eq!(cache.get(&"key".to_string()), Some(42));

        clock.advance(Duration::from_millis(1));
        assert_eq!(cache.get(&"key".to_string()), None);
        assert_eq!(cache.len(), 0);
    }

    /// Validates `MockClock::new` behavior for the unexpired entry scenario.
    #[test]
    fn test_ttl_not_expired() {
        let clock = MockClock::new();
        let cache = cache_with_clock(10, clock.clone());

        cache.put_with_ttl("key".to_string(), 42, Duration::from_secs(10));
        clock.advance(Duration::from_secs(5));

        assert_eq!(cache.get(&"key".to_string()), Some(42));
        assert_eq!(cache.len(), 1);
    }

    /// Validates lazy cleanup reclaims capacity: with capacity 1, reading an
    /// expired entry frees its slot so the next insert evicts nothing.
    #[test]
    fn test_lazy_cleanup_reclaims_capacity() {
        let clock = MockClock::new();
        let cache = cache_with_clock(1, clock.clone());

        cache.put_with_ttl("a".to_string(), 1, Duration::ZERO);
        clock.advance(Duration::from_millis(1));

        // The read observes the dead entry, removes it, and reports a miss.
        assert_eq!(cache.get(&"a".to_string()), None);
        assert_eq!(cache.len(), 0);

        cache.put("b".to_string(), 2);
        assert_eq!(cache.get(&"a".to_string()), None);
        assert_eq!(cache.get(&"b".to_string()), Some(2));

        let stats = cache.stats();
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.expirations, 1);
    }

    /// Validates that eviction is governed by recency only: a live entry that
    /// is least recently used is evicted while a dead-but-recent entry
    /// lingers until observed.
    #[test]
    fn test_eviction_ignores_expiry() {
        let clock = MockClock::new();
        let cache = cache_with_clock(2, clock.clone());

        cache.put_with_ttl("live".to_string(), 1, Duration::from_secs(3600));
        cache.put_with_ttl("dead".to_string(), 2, Duration::ZERO);
        clock.advance(Duration::from_millis(1));

        // "live" is the LRU entry; it is evicted even though "dead" expired.
        cache.put("new".to_string(), 3);

        assert_eq!(cache.get(&"live".to_string()), None);
        assert_eq!(cache.get(&"dead".to_string()), None); // lazily removed now
        assert_eq!(cache.get(&"new".to_string()), Some(3));
    }

    /// Validates `TtlLruCache::clear` behavior.
    #[test]
    fn test_cache_clear() {
        let cache: TtlLruCache<String, i32> =
            TtlLruCache::new(CacheConfig::try_new(10).unwrap());

        cache.put("key1".to_string(), 1);
        cache.put("key2".to_string(), 2);
        cache.clear();

        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    /// Validates `TtlLruCache::get_or` behavior for the default-on-miss
    /// convention.
    #[test]
    fn test_get_or_returns_default_on_miss() {
        let cache: TtlLruCache<String, i32> =
            TtlLruCache::new(CacheConfig::try_new(10).unwrap());

        cache.put("key".to_string(), 42);
        assert_eq!(cache.get_or(&"key".to_string(), -1), 42);
        assert_eq!(cache.get_or(&"missing".to_string(), -1), -1);
    }

    /// Validates stats tracking across hits, misses, inserts, and evictions.
    #[test]
    fn test_stats_tracking() {
        let clock = MockClock::new();
        let cache = cache_with_clock(2, clock);

        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        cache.put("c".to_string(), 3); // evicts "a"

        assert_eq!(cache.get(&"b".to_string()), Some(2)); // hit
        assert_eq!(cache.get(&"a".to_string()), None); // miss

        let stats = cache.stats();
        assert_eq!(stats.inserts, 3);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 2);
        assert_eq!(stats.capacity, 2);
    }

    /// Validates `Arc::new` behavior for the thread safety scenario.
    ///
    /// Assertions:
    /// - Confirms `cache.len()` equals `100` after 10 threads insert 10
    ///   distinct keys each.
    #[test]
    fn test_thread_safety() {
        let cache: Arc<TtlLruCache<String, i32>> =
            Arc::new(TtlLruCache::new(CacheConfig::try_new(100).unwrap()));
        let mut handles = vec![];

        for i in 0..10 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for j in 0..10 {
                    let key = format!("key-{i}-{j}");
                    cache.put(key.clone(), i * 10 + j);
                    assert_eq!(cache.get(&key), Some(i * 10 + j));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 100);
    }

    /// Hammers the lazy-expiry upgrade path from many threads: concurrent
    /// reads of expiring entries interleaved with refreshing writes must
    /// never violate the capacity bound or panic.
    #[test]
    fn test_expiry_upgrade_race_smoke() {
        let cache: Arc<TtlLruCache<String, i32>> =
            Arc::new(TtlLruCache::new(CacheConfig::try_new(8).unwrap()));
        let mut handles = vec![];

        for t in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..200 {
                    let key = format!("k{}", i % 4);
                    if t % 2 == 0 {
                        cache.put_with_ttl(key, i, Duration::ZERO);
                    } else {
                        let _ = cache.get(&key);
                    }
                    assert!(cache.len() <= 8);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 8);
    }

    /// Validates `TtlLruCache::clone` shares storage between handles.
    #[test]
    fn test_clone_shares_storage() {
        let cache1: TtlLruCache<String, i32> =
            TtlLruCache::new(CacheConfig::try_new(10).unwrap());
        cache1.put("key".to_string(), 42);

        let cache2 = cache1.clone();
        assert_eq!(cache2.get(&"key".to_string()), Some(42));

        cache2.put("key2".to_string(), 84);
        assert_eq!(cache1.get(&"key2".to_string()), Some(84));
    }
}
