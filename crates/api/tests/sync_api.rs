//! HTTP-level integration tests for sync-engine status and the health
//! endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json};

#[tokio::test]
async fn test_health_reports_ok_local_only() {
    let test = common::build_test_app();
    let response = get(test.app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["remote"], false);
    assert_eq!(json["session_expired"], false);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_sync_status_starts_clean() {
    let test = common::build_test_app();
    let response = get(test.app, "/api/v1/sync/status").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["last_error"].is_null());
    assert_eq!(json["session_expired"], false);
    assert_eq!(json["remote"], false);
}

#[tokio::test]
async fn test_clear_error_returns_204() {
    let test = common::build_test_app();
    let response = delete(test.app.clone(), "/api/v1/sync/error").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(test.app, "/api/v1/sync/status").await;
    let json = body_json(response).await;
    assert!(json["last_error"].is_null());
}

#[tokio::test]
async fn test_refresh_local_only_is_a_no_op() {
    let test = common::build_test_app();
    let response = post_json(test.app.clone(), "/api/v1/sync/refresh", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["last_error"].is_null());

    // The demo project is still present after a refresh.
    let response = get(test.app, "/api/v1/projects/demo-aurora").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let test = common::build_test_app();
    let response = get(test.app, "/api/v1/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
