use atelier_core::CoreError;

use crate::gateway::GatewayError;

/// Errors surfaced by the synchronization layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain-level error from `atelier_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The remote persistence call failed; the optimistic change was
    /// reverted before this error was returned.
    #[error("Remote sync failed: {0}")]
    Gateway(#[from] GatewayError),

    /// The snapshot cache could not be read or written.
    #[error("Snapshot cache I/O error: {0}")]
    CacheIo(#[from] std::io::Error),

    /// An entity or the cache blob failed to (de)serialize.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Convenience alias for synchronization-layer results.
pub type StoreResult<T> = Result<T, StoreError>;
