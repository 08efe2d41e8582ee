//! Handlers for sync-engine status and the shared error slot.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Current engine status as shown in the admin header.
#[derive(Debug, Serialize)]
pub struct SyncStatus {
    /// Most recent remote-sync failure, if not yet dismissed.
    pub last_error: Option<String>,
    pub session_expired: bool,
    /// Whether a remote document store is configured at all.
    pub remote: bool,
}

fn status_of(state: &AppState) -> SyncStatus {
    SyncStatus {
        last_error: state.engine.last_error(),
        session_expired: state.engine.session_expired(),
        remote: state.engine.has_gateway(),
    }
}

/// GET /api/v1/sync/status
pub async fn status(State(state): State<AppState>) -> Json<SyncStatus> {
    Json(status_of(&state))
}

/// DELETE /api/v1/sync/error
///
/// The error slot never expires on its own; the admin dismisses it here.
pub async fn clear_error(State(state): State<AppState>) -> StatusCode {
    state.engine.clear_error();
    StatusCode::NO_CONTENT
}

/// POST /api/v1/sync/refresh
///
/// Reconcile every collection from the remote store. Fetch failures fail
/// open (last-known-good state is kept), so this always returns the
/// post-refresh status rather than an error.
pub async fn refresh(State(state): State<AppState>) -> Json<SyncStatus> {
    state.engine.refresh().await;
    Json(status_of(&state))
}
