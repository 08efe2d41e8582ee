#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use atelier_api::config::ServerConfig;
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_store::{RemoteGateway, SnapshotCache, SyncEngine};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(data_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_dir: data_dir.to_path_buf(),
        upstream_url: None,
    }
}

/// A fully wired application router over a temp-dir snapshot cache.
///
/// Holds the tempdir so the cache outlives the test, and the engine so
/// tests can inspect state behind the HTTP surface.
pub struct TestApp {
    pub app: Router,
    pub engine: Arc<SyncEngine>,
    _dir: tempfile::TempDir,
}

/// Build the full application router with all middleware layers, running
/// local-only (no remote gateway).
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app() -> TestApp {
    build_test_app_with_gateway(None)
}

/// Same as [`build_test_app`] but with a remote gateway wired in.
pub fn build_test_app_with_gateway(gateway: Option<Arc<dyn RemoteGateway>>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let cache = SnapshotCache::open(dir.path()).unwrap();
    let engine = Arc::new(SyncEngine::new(cache, gateway).unwrap());
    let config = test_config(dir.path());

    let state = AppState {
        engine: Arc::clone(&engine),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    TestApp {
        app,
        engine,
        _dir: dir,
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as parsed JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as a UTF-8 string.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
