//! Upstream Module
//!
//! Access to the government open-data API that supplies district records.

mod client;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::UpstreamError;
use crate::params::ParamSet;

pub use client::DataGovClient;

/// A source of raw district payloads.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Fetches one page of records for the given parameter set.
    ///
    /// Any 2xx JSON body is returned verbatim, including bodies whose own
    /// `status` field reports an error.
    async fn fetch(&self, params: &ParamSet) -> Result<Value, UpstreamError>;
}

/// Returns the upstream `status` field when it is anything other than `"ok"`.
pub fn non_ok_status(payload: &Value) -> Option<String> {
    match payload.get("status").and_then(Value::as_str) {
        Some("ok") => None,
        Some(other) => Some(other.to_string()),
        None => Some("<missing>".to_string()),
    }
}
