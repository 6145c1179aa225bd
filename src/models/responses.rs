//! Response DTOs for the proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cache::CacheStats;

/// Where a district payload was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Upstream,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Cache => "cache",
            Source::Upstream => "upstream",
        }
    }
}

/// An upstream payload tagged with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedPayload {
    pub source: Source,
    pub payload: Value,
}

impl SourcedPayload {
    pub fn new(source: Source, payload: Value) -> Self {
        Self { source, payload }
    }

    /// Builds the `{source, ...payload}` response body.
    ///
    /// Payload fields are merged after the tag, so a payload field named
    /// `source` takes precedence. Non-object payloads land under `data`.
    pub fn into_body(self) -> Value {
        let mut body = Map::new();
        body.insert(
            "source".to_string(),
            Value::String(self.source.as_str().to_string()),
        );

        match self.payload {
            Value::Object(fields) => body.extend(fields),
            other => {
                body.insert("data".to_string(), other);
            }
        }

        Value::Object(body)
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Requests answered from a fresh cache entry
    pub hits: u64,
    /// Requests that needed an upstream fetch
    pub misses: u64,
    /// Upstream calls attempted
    pub upstream_calls: u64,
    /// Upstream calls that failed
    pub upstream_failures: u64,
    /// Cache writes that failed
    pub store_failures: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            upstream_calls: stats.upstream_calls,
            upstream_failures: stats.upstream_failures,
            store_failures: stats.store_failures,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
