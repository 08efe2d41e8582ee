use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether a remote document store is configured.
    pub remote: bool,
    /// Whether the remote session has been flagged as expired.
    pub session_expired: bool,
}

/// GET /health -- returns service and sync-engine health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let session_expired = state.engine.session_expired();
    let status = if session_expired { "degraded" } else { "ok" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        remote: state.engine.has_gateway(),
        session_expired,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
