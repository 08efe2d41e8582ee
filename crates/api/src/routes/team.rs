//! Route definitions for the `/team` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::team;
use crate::state::AppState;

/// Routes mounted at `/team`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(team::list).post(team::create))
        .route(
            "/{id}",
            get(team::get_by_id).put(team::update).delete(team::delete),
        )
}
