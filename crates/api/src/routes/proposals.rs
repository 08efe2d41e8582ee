//! Route definitions for the `/proposals` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::proposals;
use crate::state::AppState;

/// Routes mounted at `/proposals`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(proposals::list).post(proposals::create))
        .route(
            "/{id}",
            get(proposals::get_by_id)
                .put(proposals::update)
                .delete(proposals::delete),
        )
}
