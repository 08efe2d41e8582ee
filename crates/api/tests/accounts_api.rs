//! HTTP-level integration tests for accounts and the ledger sub-resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};

async fn create_account(app: axum::Router, name: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/accounts",
        serde_json::json!({"contact_name": name}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_and_get_account() {
    let test = common::build_test_app();
    let id = create_account(test.app.clone(), "Ada").await;

    let response = get(test.app, &format!("/api/v1/accounts/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["contact_name"], "Ada");
    assert_eq!(json["status"], "active");
    assert_eq!(json["balance"], 0.0);
}

#[tokio::test]
async fn test_update_account_fields() {
    let test = common::build_test_app();
    let id = create_account(test.app.clone(), "Ada").await;

    let response = put_json(
        test.app,
        &format!("/api/v1/accounts/{id}"),
        serde_json::json!({"company": "Aurora Coffee Co."}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["company"], "Aurora Coffee Co.");
    assert_eq!(json["contact_name"], "Ada");
}

#[tokio::test]
async fn test_delete_archives_instead_of_removing() {
    let test = common::build_test_app();
    let id = create_account(test.app.clone(), "Ada").await;

    let response = delete(test.app.clone(), &format!("/api/v1/accounts/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The account is still readable, just archived.
    let response = get(test.app, &format!("/api/v1/accounts/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "archived");
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_append_transactions_maintains_balance() {
    let test = common::build_test_app();
    let id = create_account(test.app.clone(), "Ada").await;

    let response = post_json(
        test.app.clone(),
        &format!("/api/v1/accounts/{id}/transactions"),
        serde_json::json!({"kind": "Debt", "amount": 1000.0, "description": "Logo package"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        test.app.clone(),
        &format!("/api/v1/accounts/{id}/transactions"),
        serde_json::json!({"kind": "Payment", "amount": 400.0, "description": "Deposit"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["account"]["total_debt"], 1000.0);
    assert_eq!(json["account"]["total_paid"], 400.0);
    assert_eq!(json["account"]["balance"], 600.0);

    let response = get(test.app, &format!("/api/v1/accounts/{id}/transactions")).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_append_transaction_rejects_non_positive_amount() {
    let test = common::build_test_app();
    let id = create_account(test.app.clone(), "Ada").await;

    let response = post_json(
        test.app.clone(),
        &format!("/api/v1/accounts/{id}/transactions"),
        serde_json::json!({"kind": "Debt", "amount": 0.0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // No partial state: the ledger stayed empty.
    let response = get(test.app, &format!("/api/v1/accounts/{id}/transactions")).await;
    let json = body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_transactions_for_unknown_account_return_404() {
    let test = common::build_test_app();
    let response = get(test.app.clone(), "/api/v1/accounts/nope/transactions").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(
        test.app,
        "/api/v1/accounts/nope/transactions",
        serde_json::json!({"kind": "Debt", "amount": 10.0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_transaction_listing_is_scoped_to_account() {
    let test = common::build_test_app();
    let first = create_account(test.app.clone(), "Ada").await;
    let second = create_account(test.app.clone(), "Grace").await;

    post_json(
        test.app.clone(),
        &format!("/api/v1/accounts/{first}/transactions"),
        serde_json::json!({"kind": "Debt", "amount": 100.0}),
    )
    .await;

    let response = get(test.app, &format!("/api/v1/accounts/{second}/transactions")).await;
    let json = body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}
