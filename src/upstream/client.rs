//! data.gov.in API client
//!
//! Issues the GET request for a district parameter set and returns the body
//! as an opaque JSON value.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::Upstream;
use crate::config::Config;
use crate::error::UpstreamError;
use crate::params::ParamSet;

/// Client for the data.gov.in resource API
#[derive(Debug, Clone)]
pub struct DataGovClient {
    client: Client,
    resource_url: String,
}

impl DataGovClient {
    /// Creates a client for `resource_url` with a per-request timeout.
    pub fn new(resource_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            resource_url: resource_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        Self::new(config.resource_url(), config.upstream_timeout_duration())
    }

    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }
}

#[async_trait]
impl Upstream for DataGovClient {
    async fn fetch(&self, params: &ParamSet) -> Result<Value, UpstreamError> {
        debug!(
            "Fetching {} (offset={:?}, limit={:?})",
            self.resource_url,
            params.get(crate::params::OFFSET_PARAM),
            params.get(crate::params::LIMIT_PARAM)
        );

        let response = self
            .client
            .get(&self.resource_url)
            .query(params.pairs())
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
