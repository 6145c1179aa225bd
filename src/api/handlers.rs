//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::models::{DistrictQuery, HealthResponse, StatsResponse};
use crate::proxy::FetchProxy;
use crate::states::STATES;
use crate::upstream::DataGovClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Caching proxy in front of the upstream API
    pub proxy: Arc<FetchProxy>,
}

impl AppState {
    /// Creates a new AppState around the given proxy.
    pub fn new(proxy: FetchProxy) -> Self {
        Self {
            proxy: Arc::new(proxy),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the cache file (creating it if needed) and builds the HTTP client
    /// for the upstream API.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = CacheStore::open(&config.cache_file).await?;
        let client = DataGovClient::from_config(config)?;
        let proxy = FetchProxy::new(
            Arc::new(store),
            Arc::new(client),
            config.api_key.clone(),
            config.cache_ttl_duration(),
        );
        Ok(Self::new(proxy))
    }
}

/// Handler for GET /api/mgnrega
///
/// Returns `{source, ...upstreamFields}` for a state and financial year.
/// An undecodable query string is answered with a JSON 400 like any other
/// client error.
pub async fn district_data_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<DistrictQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    let sourced = state.proxy.get_district_data(&query).await?;
    Ok(Json(sourced.into_body()))
}

/// Handler for GET /api/states
///
/// Returns the static list of state names.
pub async fn states_handler() -> Json<&'static [&'static str]> {
    Json(STATES)
}

/// Handler for GET /stats
///
/// Returns proxy counters since startup.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.proxy.stats().await))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
