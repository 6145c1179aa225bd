//! Request DTOs for the proxy API
//!
//! Defines the query strings accepted by the HTTP endpoints.

use serde::Deserialize;

use crate::error::{ProxyError, MISSING_PARAMS_MESSAGE};

pub const DEFAULT_OFFSET: &str = "0";
pub const DEFAULT_LIMIT: &str = "10";

/// Query string for `GET /api/mgnrega`.
///
/// `offset` and `limit` are kept as raw strings; malformed numbers are
/// forwarded upstream untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistrictQuery {
    #[serde(default)]
    pub state_name: Option<String>,
    #[serde(default)]
    pub fin_year: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// A district query that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuery {
    pub state_name: String,
    pub fin_year: String,
    pub offset: String,
    pub limit: String,
}

impl DistrictQuery {
    /// Convenience constructor used by tests and callers outside HTTP.
    pub fn new(state_name: impl Into<String>, fin_year: impl Into<String>) -> Self {
        Self {
            state_name: Some(state_name.into()),
            fin_year: Some(fin_year.into()),
            offset: None,
            limit: None,
        }
    }

    pub fn with_page(mut self, offset: impl Into<String>, limit: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self.limit = Some(limit.into());
        self
    }

    /// Trims the required fields and applies paging defaults.
    ///
    /// Fails when `state_name` or `fin_year` is absent or blank.
    pub fn validate(&self) -> Result<ValidQuery, ProxyError> {
        let state_name = trimmed(&self.state_name);
        let fin_year = trimmed(&self.fin_year);

        match (state_name, fin_year) {
            (Some(state_name), Some(fin_year)) => Ok(ValidQuery {
                state_name,
                fin_year,
                offset: or_default(&self.offset, DEFAULT_OFFSET),
                limit: or_default(&self.limit, DEFAULT_LIMIT),
            }),
            _ => Err(ProxyError::Validation(MISSING_PARAMS_MESSAGE.to_string())),
        }
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// An empty paging value falls back to the default, like an absent one.
fn or_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
