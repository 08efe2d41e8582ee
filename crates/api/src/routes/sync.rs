//! Route definitions for the `/sync` engine-status resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::sync;
use crate::state::AppState;

/// Routes mounted at `/sync`.
///
/// ```text
/// GET    /status    -> status (last error, session flag, remote mode)
/// DELETE /error     -> clear_error
/// POST   /refresh   -> refresh (reconcile all collections from remote)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(sync::status))
        .route("/error", delete(sync::clear_error))
        .route("/refresh", post(sync::refresh))
}
