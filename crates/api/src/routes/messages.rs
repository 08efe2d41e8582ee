//! Route definitions for the `/messages` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Routes mounted at `/messages`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(messages::list).post(messages::create))
        .route(
            "/{id}",
            get(messages::get_by_id)
                .put(messages::update)
                .delete(messages::delete),
        )
}
