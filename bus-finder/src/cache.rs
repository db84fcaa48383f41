//! Caching layer for search outcomes.
//!
//! Connection search is the most expensive query the service answers, and
//! the same (from, to) pairs are asked repeatedly. Outcomes are cached by
//! the normalized pair, so surface differences in typing share an entry.
//! Keys carry the dataset generation the outcome was computed from, so a
//! search that finishes after a replacement can never be served for the
//! new routes. The whole cache is also dropped on replacement.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::finder::SearchOutcome;
use crate::stops::normalize;

/// Cache key: dataset generation, normalized from, normalized to.
type SearchKey = (u64, String, String);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

/// Cache for connection-search outcomes.
pub struct SearchCache {
    outcomes: MokaCache<SearchKey, Arc<SearchOutcome>>,
}

impl SearchCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let outcomes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { outcomes }
    }

    /// The key a (from, to) query against dataset `generation` is cached under.
    pub fn key(generation: u64, from: &str, to: &str) -> SearchKey {
        (generation, normalize(from), normalize(to))
    }

    pub async fn get(&self, key: &SearchKey) -> Option<Arc<SearchOutcome>> {
        self.outcomes.get(key).await
    }

    pub async fn insert(&self, key: SearchKey, outcome: Arc<SearchOutcome>) {
        self.outcomes.insert(key, outcome).await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.outcomes.invalidate_all();
    }
}
