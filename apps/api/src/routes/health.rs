//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::SharedState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub database: bool,
}

/// `GET /health`. Always 200; `database` says whether PostgreSQL answered.
pub async fn check(State(state): State<SharedState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        database: state.db.health_check().await,
    })
}
