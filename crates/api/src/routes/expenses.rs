//! Route definitions for the `/expenses` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::expenses;
use crate::state::AppState;

/// Routes mounted at `/expenses`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(expenses::list).post(expenses::create))
        .route(
            "/{id}",
            get(expenses::get_by_id)
                .put(expenses::update)
                .delete(expenses::delete),
        )
}
