pub mod accounts;
pub mod briefs;
pub mod expenses;
pub mod health;
pub mod messages;
pub mod projects;
pub mod proposals;
pub mod sync;
pub mod team;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                              list, create
/// /projects/sync                         bulk external sync (POST)
/// /projects/{id}                         get, update, delete
/// /projects/{id}/brand-page              rendered brand page HTML (GET)
///
/// /accounts                              list, create
/// /accounts/{id}                         get, update, archive (DELETE)
/// /accounts/{id}/transactions            list, append (GET, POST)
/// /accounts/{id}/brief                   assign intake form (POST)
/// /accounts/{id}/brief/approve           approve submitted brief (POST)
///
/// /briefs/{token}                        client-facing brief submission (POST)
///
/// /proposals                             list, create
/// /proposals/{id}                        get, update, delete
///
/// /expenses                              list, create
/// /expenses/{id}                         get, update, delete
///
/// /messages                              list, create
/// /messages/{id}                         get, update, delete
///
/// /team                                  list, create
/// /team/{id}                             get, update, delete
///
/// /sync/status                           engine status (GET)
/// /sync/error                            clear the error slot (DELETE)
/// /sync/refresh                          reconcile from remote (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Project routes (also carries bulk sync and the brand-page view).
        .nest("/projects", projects::router())
        // Account routes (ledger and brief-intake sub-resources included).
        .nest("/accounts", accounts::router())
        // Unauthenticated brief submission by share token.
        .nest("/briefs", briefs::router())
        .nest("/proposals", proposals::router())
        .nest("/expenses", expenses::router())
        .nest("/messages", messages::router())
        .nest("/team", team::router())
        // Sync-engine status, error slot, and manual refresh.
        .nest("/sync", sync::router())
}
