//! Remote persistence gateway: the thin client wrapping the document
//! store's per-collection CRUD endpoints.
//!
//! The gateway speaks JSON-shaped entity representations and classifies
//! failures at the boundary: a 401-equivalent response becomes
//! [`GatewayError::SessionExpired`] so the caller can run the global
//! session handler, every other non-success status and transport failure
//! takes the ordinary revert path.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use atelier_core::EntityId;

/// Default request timeout. A hung call times out into the ordinary
/// failure/revert path instead of pinning optimistic state forever.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The remote store rejected our session. Handled globally, not
    /// per-call.
    #[error("Session expired")]
    SessionExpired,

    /// Any other non-success HTTP status.
    #[error("Remote store returned status {0}")]
    Status(u16),

    /// Network-level failure (connect, timeout, malformed body).
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Per-collection CRUD against the remote document store.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Fetch a full collection. May be a narrow projection that omits
    /// heavy embedded payloads.
    async fn list(&self, collection: &str) -> Result<Vec<Value>, GatewayError>;

    /// Create a record; the returned value is the canonical representation
    /// including the server-assigned identifier.
    async fn create(&self, collection: &str, body: Value) -> Result<Value, GatewayError>;

    async fn update(
        &self,
        collection: &str,
        id: &EntityId,
        body: Value,
    ) -> Result<Value, GatewayError>;

    async fn delete(&self, collection: &str, id: &EntityId) -> Result<(), GatewayError>;

    /// Submit intake-brief answers against a share token.
    async fn submit_brief(&self, token: &str, answers: Value) -> Result<(), GatewayError>;
}

/// HTTP implementation over the remote store's REST surface.
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Map a response to the gateway error taxonomy, passing successes on.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.as_u16() == 401 {
            return Err(GatewayError::SessionExpired);
        }
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn list(&self, collection: &str) -> Result<Vec<Value>, GatewayError> {
        let response = self.client.get(self.url(collection)).send().await?;
        let body: Value = Self::check(response).await?.json().await?;
        match body {
            Value::Array(items) => Ok(items),
            other => Err(GatewayError::Transport(format!(
                "expected a JSON array for collection '{collection}', got {other}"
            ))),
        }
    }

    async fn create(&self, collection: &str, body: Value) -> Result<Value, GatewayError> {
        let response = self
            .client
            .post(self.url(collection))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update(
        &self,
        collection: &str,
        id: &EntityId,
        body: Value,
    ) -> Result<Value, GatewayError> {
        let response = self
            .client
            .put(self.url(&format!("{collection}/{id}")))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, collection: &str, id: &EntityId) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.url(&format!("{collection}/{id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn submit_brief(&self, token: &str, answers: Value) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url(&format!("briefs/{token}")))
            .json(&answers)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
