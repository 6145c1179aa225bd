//! Cache Statistics Module
//!
//! Tracks proxy performance metrics including hits, misses, and upstream failures.

use serde::Serialize;

// == Cache Stats ==
/// Counters kept by the fetch proxy since startup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Requests answered from a fresh entry
    pub hits: u64,
    /// Requests with no entry or a stale one
    pub misses: u64,
    /// Upstream calls attempted
    pub upstream_calls: u64,
    /// Upstream calls that failed
    pub upstream_failures: u64,
    /// Cache writes that failed
    pub store_failures: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Upstream Call ==
    /// Increments the upstream call counter.
    pub fn record_upstream_call(&mut self) {
        self.upstream_calls += 1;
    }

    // == Record Upstream Failure ==
    /// Increments the upstream failure counter.
    pub fn record_upstream_failure(&mut self) {
        self.upstream_failures += 1;
    }

    // == Record Store Failure ==
    /// Increments the failed cache write counter.
    pub fn record_store_failure(&mut self) {
        self.store_failures += 1;
    }
}
