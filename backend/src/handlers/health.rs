//! Health check handlers

use axum::{extract::State, http::StatusCode, response::Response};
use serde::Serialize;

use crate::handlers::respond;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Response {
    // Check database connectivity
    let db_status = match tokio::time::timeout(
        state.config.request.timeout(),
        sqlx::query("SELECT 1").execute(&state.db),
    )
    .await
    {
        Ok(Ok(_)) => "connected",
        Ok(Err(err)) => {
            tracing::warn!("Health check database error: {}", err);
            "disconnected"
        }
        Err(_) => "timeout",
    };

    respond(
        StatusCode::OK,
        HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: db_status.to_string(),
        },
    )
}
