//! Reconciliation-on-load: refresh every collection from the remote store
//! and merge into resident state.
//!
//! Refresh is a background concern, so it fails open: a collection whose
//! fetch errors keeps its last-known-good local state and the refresh
//! moves on. The one exception is a session-expired response, which stops
//! the refresh and runs the global session handler.

use std::sync::Arc;

use atelier_core::account::Account;
use atelier_core::expense::Expense;
use atelier_core::ledger::Transaction;
use atelier_core::merge::{merge_projects, merge_remote};
use atelier_core::message::Message;
use atelier_core::project::Project;
use atelier_core::proposal::Proposal;
use atelier_core::team::TeamMember;

use crate::engine::SyncEngine;
use crate::gateway::{GatewayError, RemoteGateway};
use crate::store::{Collections, Entity, HasSlot};

impl SyncEngine {
    /// Fetch every collection and reconcile it into memory. Never returns
    /// an error: fetch failures leave the last-known-good state in place.
    pub async fn refresh(&self) {
        let Some(gateway) = self.gateway.clone() else {
            return;
        };
        let now = chrono::Utc::now();

        let outcomes = [
            self.refresh_collection::<Project>(&gateway, |local, remote| {
                merge_projects(local, remote, now)
            })
            .await,
            self.refresh_collection::<Account>(&gateway, merge_remote).await,
            self.refresh_collection::<Transaction>(&gateway, merge_remote).await,
            self.refresh_collection::<Proposal>(&gateway, merge_remote).await,
            self.refresh_collection::<Expense>(&gateway, merge_remote).await,
            self.refresh_collection::<Message>(&gateway, merge_remote).await,
            self.refresh_collection::<TeamMember>(&gateway, merge_remote).await,
        ];

        if outcomes
            .iter()
            .any(|o| matches!(o, Err(GatewayError::SessionExpired)))
        {
            self.mark_session_expired();
        }
    }

    /// Refresh one collection. A fetch failure is logged and returned but
    /// leaves the resident collection untouched (fail open).
    async fn refresh_collection<T: Entity>(
        &self,
        gateway: &Arc<dyn RemoteGateway>,
        merge: impl FnOnce(&[T], Vec<T>) -> Vec<T>,
    ) -> Result<(), GatewayError>
    where
        Collections: HasSlot<T>,
    {
        let raw = match gateway.list(T::COLLECTION).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(
                    collection = T::COLLECTION,
                    error = %err,
                    "Collection refresh failed, keeping last-known-good state"
                );
                return Err(err);
            }
        };

        let mut remote = Vec::with_capacity(raw.len());
        for value in raw {
            match serde_json::from_value::<T>(value) {
                Ok(entity) => remote.push(entity),
                Err(err) => {
                    tracing::warn!(
                        collection = T::COLLECTION,
                        error = %err,
                        "Skipping unreadable remote record"
                    );
                }
            }
        }

        let local: Vec<T> = self.store.list();
        let merged = merge(&local, remote);
        let count = merged.len();
        self.store.with_mut(|c| *c.slot_mut() = merged);
        if let Err(err) = self.persist::<T>() {
            tracing::warn!(collection = T::COLLECTION, error = %err, "Failed to mirror refreshed collection to snapshot cache");
        }
        tracing::info!(collection = T::COLLECTION, count, "Collection refreshed");
        Ok(())
    }
}
