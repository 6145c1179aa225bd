//! MGNREGA Proxy - A caching relay for the data.gov.in district statistics API
//!
//! Deduplicates upstream calls by request fingerprint and persists responses
//! to a JSON file with a freshness window.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod params;
pub mod proxy;
pub mod states;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use proxy::FetchProxy;
