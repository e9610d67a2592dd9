//! # Varejo API
//!
//! REST server for the retail/inventory backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Varejo API Server                                │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► routes ───► varejo-db ───► PostgreSQL    │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │                           varejo-core                                   │
//! │                 (query parsing, periods, report assembly)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers parse and validate the request before any store access, delegate
//! to a repository, and map errors through [`ApiError`].

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use varejo_db::Database;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use routes::router;

/// Shared application state.
///
/// Holds only the pool handle and immutable configuration.
#[derive(Debug)]
pub struct AppState {
    pub db: Database,
    pub config: ApiConfig,
}

pub type SharedState = Arc<AppState>;
