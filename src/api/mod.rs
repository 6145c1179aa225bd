//! API Module
//!
//! HTTP handlers and routing for the proxy REST API.
//!
//! # Endpoints
//! - `GET /api/mgnrega` - District data for a state and financial year
//! - `GET /api/states` - Static list of state names
//! - `GET /stats` - Proxy statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
