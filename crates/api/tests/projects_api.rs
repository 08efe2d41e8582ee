//! HTTP-level integration tests for the project endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. The engine runs local-only, so every
//! mutation is applied and persisted without a remote leg.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};

// ---------------------------------------------------------------------------
// Project CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_project_returns_201() {
    let test = common::build_test_app();
    let response = post_json(
        test.app,
        "/api/v1/projects",
        serde_json::json!({"title": "Brand Refresh", "client": "Acme"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Brand Refresh");
    assert_eq!(json["client"], "Acme");
    assert!(json["id"].is_string());
}

#[tokio::test]
async fn test_create_project_rejects_empty_title() {
    let test = common::build_test_app();
    let response = post_json(
        test.app,
        "/api/v1/projects",
        serde_json::json!({"title": "  "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_projects_always_contains_demo() {
    let test = common::build_test_app();
    let response = get(test.app, "/api/v1/projects").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    let demo_count = items
        .iter()
        .filter(|p| p["id"].as_str().map(|s| s.starts_with("demo-")).unwrap_or(false))
        .count();
    assert_eq!(demo_count, 1);
}

#[tokio::test]
async fn test_get_project_by_id() {
    let test = common::build_test_app();
    let create_resp = post_json(
        test.app.clone(),
        "/api/v1/projects",
        serde_json::json!({"title": "Get Me"}),
    )
    .await;
    let created = body_json(create_resp).await;
    let id = created["id"].as_str().unwrap();

    let response = get(test.app, &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Get Me");
}

#[tokio::test]
async fn test_get_nonexistent_project_returns_404() {
    let test = common::build_test_app();
    let response = get(test.app, "/api/v1/projects/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_project_status_and_progress() {
    let test = common::build_test_app();
    let create_resp = post_json(
        test.app.clone(),
        "/api/v1/projects",
        serde_json::json!({"title": "Original"}),
    )
    .await;
    let created = body_json(create_resp).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = put_json(
        test.app,
        &format!("/api/v1/projects/{id}"),
        serde_json::json!({"status": "in_progress", "progress": 250}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "in_progress");
    // Progress clamps to 100.
    assert_eq!(json["progress"], 100);
}

#[tokio::test]
async fn test_update_project_rejects_unknown_status() {
    let test = common::build_test_app();
    let create_resp = post_json(
        test.app.clone(),
        "/api/v1/projects",
        serde_json::json!({"title": "P"}),
    )
    .await;
    let created = body_json(create_resp).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = put_json(
        test.app.clone(),
        &format!("/api/v1/projects/{id}"),
        serde_json::json!({"status": "on_fire"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The failed update left the project untouched.
    let response = get(test.app, &format!("/api/v1/projects/{id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "planning");
}

#[tokio::test]
async fn test_delete_project_returns_204() {
    let test = common::build_test_app();
    let create_resp = post_json(
        test.app.clone(),
        "/api/v1/projects",
        serde_json::json!({"title": "Delete Me"}),
    )
    .await;
    let created = body_json(create_resp).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = delete(test.app.clone(), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Subsequent GET should 404.
    let response = get(test.app, &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Bulk external sync
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_bulk_sync_reports_inserted_updated_skipped() {
    let test = common::build_test_app();
    let create_resp = post_json(
        test.app.clone(),
        "/api/v1/projects",
        serde_json::json!({"title": "Existing"}),
    )
    .await;
    let created = body_json(create_resp).await;
    let existing_id = created["id"].as_str().unwrap().to_string();

    let response = post_json(
        test.app.clone(),
        "/api/v1/projects/sync",
        serde_json::json!([
            {"id": "ext-1", "title": "Imported"},
            {"id": existing_id, "title": "Existing, renamed"},
            {"title": "No identifier"},
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let report = &json["data"];
    assert_eq!(report["total"], 3);
    assert_eq!(report["synced"], 2);
    assert_eq!(report["skipped"], 1);
    let actions: Vec<&str> = report["log"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["inserted", "updated", "skipped"]);

    // The updated title is visible through the ordinary read path.
    let response = get(test.app, &format!("/api/v1/projects/{existing_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["title"], "Existing, renamed");
}

#[tokio::test]
async fn test_bulk_sync_never_touches_demo_record() {
    let test = common::build_test_app();
    let response = post_json(
        test.app.clone(),
        "/api/v1/projects/sync",
        serde_json::json!([{"id": "demo-aurora", "title": "Tampered"}]),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["skipped"], 1);

    let response = get(test.app, "/api/v1/projects/demo-aurora").await;
    let json = body_json(response).await;
    assert_eq!(json["title"], "Aurora Coffee Rebrand");
}
