//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Sample key published for the data.gov.in open API.
pub const DEFAULT_API_KEY: &str = "579b464db66ec23bdd0000011ff356e4faeb4e8876488d919bb77fe5";

/// MGNREGA district-wise performance resource.
pub const DEFAULT_RESOURCE_ID: &str = "ee03643a-ee4c-48c2-ac30-9f2ff26ab722";

pub const DEFAULT_BASE_URL: &str = "https://api.data.gov.in/resource";

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Key sent upstream as the `api-key` query parameter
    pub api_key: String,
    /// Upstream resource identifier
    pub resource_id: String,
    /// Upstream base URL, without the resource identifier
    pub base_url: String,
    /// Freshness window for cached responses, in seconds
    pub cache_ttl: u64,
    /// Location of the persisted cache file
    pub cache_file: PathBuf,
    /// Upper bound on a single upstream call, in seconds
    pub upstream_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 5000)
    /// - `API_KEY` - Upstream API key (default: public sample key)
    /// - `RESOURCE_ID` - Upstream resource identifier
    /// - `UPSTREAM_BASE_URL` - Upstream base URL (default: https://api.data.gov.in/resource)
    /// - `CACHE_TTL_SECONDS` - Cache freshness window in seconds (default: 3600)
    /// - `CACHE_FILE` - Path of the cache file (default: cache.json)
    /// - `UPSTREAM_TIMEOUT_SECONDS` - Upstream request timeout (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parsed_var("PORT").unwrap_or(defaults.server_port),
            api_key: string_var("API_KEY").unwrap_or(defaults.api_key),
            resource_id: string_var("RESOURCE_ID").unwrap_or(defaults.resource_id),
            base_url: string_var("UPSTREAM_BASE_URL").unwrap_or(defaults.base_url),
            cache_ttl: parsed_var("CACHE_TTL_SECONDS").unwrap_or(defaults.cache_ttl),
            cache_file: string_var("CACHE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_file),
            upstream_timeout: parsed_var("UPSTREAM_TIMEOUT_SECONDS")
                .unwrap_or(defaults.upstream_timeout),
        }
    }

    /// Full URL of the upstream resource.
    pub fn resource_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.resource_id
        )
    }

    pub fn cache_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn upstream_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5000,
            api_key: DEFAULT_API_KEY.to_string(),
            resource_id: DEFAULT_RESOURCE_ID.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: 3600,
            cache_file: PathBuf::from("cache.json"),
            upstream_timeout: 30,
        }
    }
}

// The API key stays out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("api_key", &"<redacted>")
            .field("resource_id", &self.resource_id)
            .field("base_url", &self.base_url)
            .field("cache_ttl", &self.cache_ttl)
            .field("cache_file", &self.cache_file)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

fn string_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
