//! Durable local snapshot cache.
//!
//! One namespaced JSON blob on disk holds the last-known-good copy of
//! every entity collection plus session metadata, so the application is
//! usable immediately after a restart regardless of network availability.
//! Every write is a read-merge-write of the whole blob: a writer updating
//! one collection key can never clobber another collection's key.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StoreResult;
use crate::store::Collections;

/// Versioned namespace file name. Bumping the version orphans old blobs
/// instead of trying to migrate them.
pub const SNAPSHOT_FILE: &str = "atelier-state.v2.json";

/// Key holding session metadata; cleared by the session-expired handler.
pub const SESSION_KEY: &str = "session";

#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    /// Open (or lazily create) the snapshot blob inside `dir`.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            path: dir.as_ref().join(SNAPSHOT_FILE),
        })
    }

    fn read_blob(&self) -> StoreResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        let value: Value = serde_json::from_str(&raw)?;
        match value {
            Value::Object(map) => Ok(map),
            // A corrupt blob is treated as empty rather than fatal; the
            // next write rebuilds it.
            _ => {
                tracing::warn!(path = %self.path.display(), "Snapshot blob is not a JSON object, ignoring");
                Ok(Map::new())
            }
        }
    }

    fn write_blob(&self, blob: &Map<String, Value>) -> StoreResult<()> {
        let raw = serde_json::to_string(blob)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Overwrite one top-level key, preserving every other key.
    pub fn write_key(&self, key: &str, value: &impl Serialize) -> StoreResult<()> {
        let mut blob = self.read_blob()?;
        blob.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_blob(&blob)
    }

    /// Read one top-level key. Returns `None` when the key is absent or
    /// fails to deserialize (stale shape from an older build).
    pub fn read_key<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let blob = self.read_blob()?;
        match blob.get(key) {
            None => Ok(None),
            Some(value) => match serde_json::from_value(value.clone()) {
                Ok(parsed) => Ok(Some(parsed)),
                Err(err) => {
                    tracing::warn!(key, error = %err, "Discarding unreadable snapshot key");
                    Ok(None)
                }
            },
        }
    }

    /// Remove session-related keys, leaving entity collections intact.
    /// Invoked by the global session-expired handler.
    pub fn clear_session(&self) -> StoreResult<()> {
        let mut blob = self.read_blob()?;
        if blob.remove(SESSION_KEY).is_some() {
            self.write_blob(&blob)?;
        }
        Ok(())
    }

    /// Restore every entity collection from the snapshot. Missing or
    /// unreadable keys fall back to empty collections.
    pub fn load_collections(&self) -> StoreResult<Collections> {
        Ok(Collections {
            projects: self.read_key("projects")?.unwrap_or_default(),
            accounts: self.read_key("accounts")?.unwrap_or_default(),
            transactions: self.read_key("transactions")?.unwrap_or_default(),
            proposals: self.read_key("proposals")?.unwrap_or_default(),
            expenses: self.read_key("expenses")?.unwrap_or_default(),
            messages: self.read_key("messages")?.unwrap_or_default(),
            team: self.read_key("team")?.unwrap_or_default(),
        })
    }
}
