//! Cache configuration types and builder patterns

use std::num::NonZeroUsize;
use std::time::Duration;

/// Default time-to-live applied by [`CacheConfig::try_new`] when no explicit
/// TTL is configured: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Configuration for cache behavior
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache will hold
    pub capacity: NonZeroUsize,

    /// Time-to-live applied by `put` when the caller does not pass one
    pub default_ttl: Duration,

    /// Whether to collect detailed access metrics
    pub track_metrics: bool,
}

impl CacheConfig {
    /// Create a configuration with the given capacity and the default TTL.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity, default_ttl: DEFAULT_TTL, track_metrics: false }
    }

    /// Attempts to construct a configuration, returning `None` when
    /// `capacity` is zero.
    pub fn try_new(capacity: usize) -> Option<Self> {
        NonZeroUsize::new(capacity).map(Self::new)
    }

    /// Create a new configuration builder.
    pub fn builder(capacity: NonZeroUsize) -> CacheConfigBuilder {
        CacheConfigBuilder { config: Self::new(capacity) }
    }
}

/// Builder for [`CacheConfig`] with a fluent API
#[derive(Debug)]
pub struct CacheConfigBuilder {
    config: CacheConfig,
}

impl CacheConfigBuilder {
    /// Set the time-to-live applied when `put` is called without one.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.config.default_ttl = ttl;
        self
    }

    /// Enable or disable metrics tracking.
    pub fn track_metrics(mut self, enabled: bool) -> Self {
        self.config.track_metrics = enabled;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CacheConfig {
        self.config
    }
}
