//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Message returned when a required query parameter is missing.
pub const MISSING_PARAMS_MESSAGE: &str = "State name and financial year are required";

/// Message returned for any upstream failure.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Error fetching data from API";

// == Proxy Error Enum ==
/// Request-level errors surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Required query parameters missing or blank
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Query string could not be decoded (e.g. a repeated key)
    #[error("Malformed query string: {0}")]
    Query(#[from] QueryRejection),

    /// Upstream API unreachable or returned a failure
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

// == Upstream Error Enum ==
/// Failures talking to the upstream data API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport failure, timeout or non-2xx status
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not JSON
    #[error("Failed to parse upstream body: {0}")]
    Parse(#[from] serde_json::Error),
}

// == Store Error Enum ==
/// Failures reading or persisting the cache file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Cache file missing or unparsable; recovered by `CacheStore::load`
    #[error("Cache read failed: {0}")]
    Read(String),

    /// Filesystem failure while persisting
    #[error("Cache write failed: {0}")]
    Io(#[from] std::io::Error),

    /// Mapping could not be serialized
    #[error("Cache serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Blocking writer task panicked or was cancelled
    #[error("Cache writer task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ProxyError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ProxyError::Query(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            ProxyError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UPSTREAM_FAILURE_MESSAGE.to_string(),
            ),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response = ProxyError::Validation(MISSING_PARAMS_MESSAGE.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_maps_to_internal_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let response = ProxyError::from(UpstreamError::from(parse_err)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
