use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use atelier_core::CoreError;
use atelier_store::{GatewayError, StoreError};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`StoreError`] (which itself carries domain and gateway errors)
/// and adds HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An error from the synchronization layer.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A domain-level error from `atelier_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Store(store) => match store {
                StoreError::Core(core) => classify_core_error(core),
                StoreError::Gateway(gateway) => classify_gateway_error(gateway),
                StoreError::CacheIo(err) => {
                    tracing::error!(error = %err, "Snapshot cache I/O error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
                StoreError::Serde(err) => {
                    tracing::error!(error = %err, "Serialization error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },
            AppError::Core(core) => classify_core_error(core),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a gateway error into an HTTP status, error code, and message.
///
/// - A rejected session maps to 401 so the client can re-authenticate.
/// - Everything else is an upstream failure: the optimistic change was
///   already reverted, the client sees 502.
fn classify_gateway_error(gateway: &GatewayError) -> (StatusCode, &'static str, String) {
    match gateway {
        GatewayError::SessionExpired => (
            StatusCode::UNAUTHORIZED,
            "SESSION_EXPIRED",
            "Session expired".to_string(),
        ),
        GatewayError::Status(code) => (
            StatusCode::BAD_GATEWAY,
            "UPSTREAM_ERROR",
            format!("Remote store returned status {code}"),
        ),
        GatewayError::Transport(msg) => {
            tracing::warn!(error = %msg, "Upstream transport error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Remote store unreachable".to_string(),
            )
        }
    }
}
