//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with freshness checks.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// A stored upstream response and the time it was written.
///
/// Serialized as `{"ts": <ms>, "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Write timestamp (Unix milliseconds)
    #[serde(rename = "ts")]
    pub timestamp: u64,
    /// Raw upstream body, stored verbatim
    #[serde(rename = "data")]
    pub payload: Value,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(payload: Value) -> Self {
        Self::at(current_timestamp_ms(), payload)
    }

    /// Creates an entry with an explicit timestamp.
    pub fn at(timestamp: u64, payload: Value) -> Self {
        Self { timestamp, payload }
    }

    // == Freshness ==
    /// Checks whether the entry is younger than `ttl` at time `now_ms`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is stale.
    /// Timestamps in the future count as age zero.
    pub fn is_fresh_at(&self, now_ms: u64, ttl: Duration) -> bool {
        let age = now_ms.saturating_sub(self.timestamp);
        u128::from(age) < ttl.as_millis()
    }

    /// Checks freshness against the current clock.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.is_fresh_at(current_timestamp_ms(), ttl)
    }

    /// Age of the entry in milliseconds.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.timestamp)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
