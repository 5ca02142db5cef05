//! Bounded key/value cache with per-entry TTL and LRU eviction
//!
//! The cache holds at most a fixed number of entries. Each entry carries its
//! own expiry deadline, computed when it is inserted. When inserting a new
//! key at capacity, the least-recently-used entry is evicted; recency is
//! refreshed by every successful read and every write. Expired entries are
//! removed lazily, when a read observes them.
//!
//! # Features
//!
//! - **Thread-safe**: multiple-reader/single-writer locking; live reads run
//!   concurrently and only structural changes take the write lock
//! - **Generic**: works with any `K: Eq + Hash + Clone` and `V: Clone`
//! - **Per-entry TTL**: each insert may override the configured default
//! - **Metrics tracking**: optional hit/miss/eviction statistics
//! - **Testable**: clock abstraction for deterministic time-based testing
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use keystone_common::cache::{CacheConfig, TtlLruCache};
//!
//! let config = CacheConfig::try_new(100).unwrap();
//! let cache: TtlLruCache<String, i32> = TtlLruCache::new(config);
//! cache.put("key".to_string(), 42);
//! assert_eq!(cache.get(&"key".to_string()), Some(42));
//!
//! // Short-lived entry
//! cache.put_with_ttl("token".to_string(), 7, Duration::from_secs(30));
//! ```
//!
//! # Eviction and expiry
//!
//! Eviction order is governed purely by recency, not by expiry time: an
//! already-expired entry that nobody has read since it died still occupies
//! its capacity slot, and a fresher entry can be evicted ahead of it. This
//! is deliberate; there is no background expiry scan.

mod config;
mod core;
mod stats;

pub use config::{CacheConfig, CacheConfigBuilder, DEFAULT_TTL};
pub use core::TtlLruCache;
pub use stats::CacheStats;
