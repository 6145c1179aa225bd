//! Cache Module
//!
//! Provides the persisted response cache: entries with freshness checks, the
//! file-backed store, and hit/miss statistics.

mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use stats::CacheStats;
pub use store::{CacheMap, CacheStore};
