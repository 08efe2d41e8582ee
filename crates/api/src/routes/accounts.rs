//! Route definitions for the `/accounts` resource.
//!
//! Also mounts the ledger and brief-intake sub-resources under
//! `/accounts/{id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{accounts, briefs, transactions};
use crate::state::AppState;

/// Routes mounted at `/accounts`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> archive
/// GET    /{id}/transactions     -> list_for_account
/// POST   /{id}/transactions     -> append
/// POST   /{id}/brief            -> assign
/// POST   /{id}/brief/approve    -> approve
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(accounts::list).post(accounts::create))
        .route(
            "/{id}",
            get(accounts::get_by_id)
                .put(accounts::update)
                .delete(accounts::archive),
        )
        .route(
            "/{id}/transactions",
            get(transactions::list_for_account).post(transactions::append),
        )
        .route("/{id}/brief", post(briefs::assign))
        .route("/{id}/brief/approve", post(briefs::approve))
}
