//! Route definitions for the client-facing `/briefs` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::briefs;
use crate::state::AppState;

/// Routes mounted at `/briefs`.
///
/// ```text
/// POST /{token}   -> submit (no admin session required)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{token}", post(briefs::submit))
}
