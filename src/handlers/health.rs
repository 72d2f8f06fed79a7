//! Health check handlers

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::{db::test_connection, state::AppState};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, database) = match test_connection(state.db()).await {
        Ok(()) => (StatusCode::OK, "connected"),
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        status,
        Json(HealthResponse {
            status: if status.is_success() { "healthy" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database.to_string(),
        }),
    )
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
