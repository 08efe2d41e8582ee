//! The synchronization protocol: every mutation runs as one optimistic
//! command.
//!
//! Sequence: snapshot the touched rows, apply in memory, mirror the
//! collection to the snapshot cache, then issue the remote call. A remote
//! failure reverts exactly the touched rows (and the cache) and populates
//! the process-wide last-error slot; a create success replaces the pending
//! temp-id record with the canonical entity in place. Collections with no
//! remote counterpart (no gateway configured) skip the remote leg
//! entirely. Apply, revert, and canonical-replace all run under the store
//! lock, so a late failure can never clobber an unrelated later apply;
//! between rapid edits of the same record, last-applied-locally wins.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use atelier_core::account::{Account, BriefAnswer};
use atelier_core::bulk::{sync_external_projects, BulkSyncReport, ExternalProject};
use atelier_core::ledger::{validate_amount, Transaction, TransactionKind};
use atelier_core::project::Project;
use atelier_core::{CoreError, EntityId, Timestamp};

use crate::cache::SnapshotCache;
use crate::error::{StoreError, StoreResult};
use crate::gateway::{GatewayError, RemoteGateway};
use crate::store::{Collections, Entity, EntityStore, HasSlot};

pub struct SyncEngine {
    pub(crate) store: EntityStore,
    pub(crate) cache: SnapshotCache,
    pub(crate) gateway: Option<Arc<dyn RemoteGateway>>,
    /// The single process-wide error slot the UI displays and clears.
    last_error: RwLock<Option<String>>,
    session_expired: AtomicBool,
}

impl SyncEngine {
    /// Restore state from the snapshot cache and guarantee the showcase
    /// project is present.
    pub fn new(
        cache: SnapshotCache,
        gateway: Option<Arc<dyn RemoteGateway>>,
    ) -> StoreResult<Self> {
        let mut collections = cache.load_collections()?;
        if !collections.projects.iter().any(Project::is_demo) {
            collections
                .projects
                .insert(0, Project::demo(chrono::Utc::now()));
        }
        let engine = Self {
            store: EntityStore::new(collections),
            cache,
            gateway,
            last_error: RwLock::new(None),
            session_expired: AtomicBool::new(false),
        };
        engine.persist::<Project>()?;
        Ok(engine)
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub fn has_gateway(&self) -> bool {
        self.gateway.is_some()
    }

    // -----------------------------------------------------------------------
    // Error slot and session flag
    // -----------------------------------------------------------------------

    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The error slot has no auto-expiry; the UI clears it explicitly.
    pub fn clear_error(&self) {
        *self.last_error.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    fn report_failure(&self, operation: &str, err: &GatewayError) {
        tracing::warn!(operation, error = %err, "Remote sync failed, optimistic change reverted");
        *self.last_error.write().unwrap_or_else(|e| e.into_inner()) =
            Some(format!("{operation}: {err}"));
        if matches!(err, GatewayError::SessionExpired) {
            self.mark_session_expired();
        }
    }

    pub fn session_expired(&self) -> bool {
        self.session_expired.load(Ordering::Relaxed)
    }

    /// Global 401 handler: clear session cache keys and flag the session
    /// so the UI can redirect to login.
    pub(crate) fn mark_session_expired(&self) {
        if let Err(err) = self.cache.clear_session() {
            tracing::warn!(error = %err, "Failed to clear session cache keys");
        }
        self.session_expired.store(true, Ordering::Relaxed);
        tracing::info!("Session expired, cleared session cache keys");
    }

    // -----------------------------------------------------------------------
    // Optimistic commands
    // -----------------------------------------------------------------------

    /// Mirror one collection into the snapshot cache.
    pub(crate) fn persist<T: Entity>(&self) -> StoreResult<()>
    where
        Collections: HasSlot<T>,
    {
        let items: Vec<T> = self.store.list();
        self.cache.write_key(T::COLLECTION, &items)
    }

    /// Create an entity. The caller supplies the record with a placeholder
    /// identifier; the engine assigns a pending temp id, applies
    /// optimistically, and swaps in the server's canonical record (matched
    /// by the temp id, position preserved) once the remote call succeeds.
    pub async fn create<T: Entity>(&self, mut entity: T) -> StoreResult<T>
    where
        Collections: HasSlot<T>,
    {
        let Some(gateway) = self.gateway.clone() else {
            // Local-only collection: the engine-assigned id is permanent
            // and steps 3-4 of the protocol are skipped.
            entity.set_id(EntityId::from(uuid::Uuid::now_v7().to_string()));
            self.store.with_mut(|c| c.slot_mut().push(entity.clone()));
            self.persist::<T>()?;
            tracing::info!(collection = T::COLLECTION, id = %entity.id(), "Created (local-only)");
            return Ok(entity);
        };

        let temp_id = EntityId::from(format!("tmp-{}", uuid::Uuid::now_v7()));
        entity.set_id(temp_id.clone());
        self.store.with_mut(|c| c.slot_mut().push(entity.clone()));
        self.persist::<T>()?;

        let body = serde_json::to_value(&entity)?;
        match gateway.create(T::COLLECTION, body).await {
            Ok(canonical) => {
                let canonical: T = serde_json::from_value(canonical)?;
                self.store.with_mut(|c| {
                    let slot = c.slot_mut();
                    match slot.iter().position(|e| e.id() == &temp_id) {
                        Some(pos) => slot[pos] = canonical.clone(),
                        // The pending record is gone (e.g. deleted while
                        // in flight); append rather than resurrecting it
                        // at an arbitrary position.
                        None => slot.push(canonical.clone()),
                    }
                });
                self.persist::<T>()?;
                tracing::info!(collection = T::COLLECTION, id = %canonical.id(), "Created");
                Ok(canonical)
            }
            Err(err) => {
                self.store
                    .with_mut(|c| c.slot_mut().retain(|e| e.id() != &temp_id));
                self.persist::<T>()?;
                self.report_failure("create", &err);
                Err(err.into())
            }
        }
    }

    /// Update an entity by identifier. The mutation closure runs on a copy;
    /// a validation error leaves the store untouched.
    pub async fn update<T: Entity>(
        &self,
        id: &EntityId,
        mutate: impl FnOnce(&mut T) -> Result<(), CoreError>,
    ) -> StoreResult<T>
    where
        Collections: HasSlot<T>,
    {
        let (pre_image, updated) = self.store.with_mut(|c| -> StoreResult<(T, T)> {
            let slot = c.slot_mut();
            let pos = slot
                .iter()
                .position(|e| e.id() == id)
                .ok_or_else(|| CoreError::NotFound {
                    entity: T::COLLECTION,
                    id: id.clone(),
                })?;
            let pre_image = slot[pos].clone();
            let mut next = pre_image.clone();
            mutate(&mut next)?;
            slot[pos] = next.clone();
            Ok((pre_image, next))
        })?;
        self.persist::<T>()?;

        let Some(gateway) = self.gateway.clone() else {
            return Ok(updated);
        };

        match gateway
            .update(T::COLLECTION, id, serde_json::to_value(&updated)?)
            .await
        {
            Ok(_) => {
                tracing::info!(collection = T::COLLECTION, %id, "Updated");
                Ok(updated)
            }
            Err(err) => {
                // Revert only the touched row.
                self.store.with_mut(|c| {
                    let slot = c.slot_mut();
                    if let Some(pos) = slot.iter().position(|e| e.id() == id) {
                        slot[pos] = pre_image;
                    }
                });
                self.persist::<T>()?;
                self.report_failure("update", &err);
                Err(err.into())
            }
        }
    }

    /// Delete an entity by identifier, restoring it at its original
    /// position if the remote call fails.
    pub async fn delete<T: Entity>(&self, id: &EntityId) -> StoreResult<()>
    where
        Collections: HasSlot<T>,
    {
        let (pos, pre_image) = self.store.with_mut(|c| -> StoreResult<(usize, T)> {
            let slot = c.slot_mut();
            let pos = slot
                .iter()
                .position(|e| e.id() == id)
                .ok_or_else(|| CoreError::NotFound {
                    entity: T::COLLECTION,
                    id: id.clone(),
                })?;
            Ok((pos, slot.remove(pos)))
        })?;
        self.persist::<T>()?;

        let Some(gateway) = self.gateway.clone() else {
            tracing::info!(collection = T::COLLECTION, %id, "Deleted (local-only)");
            return Ok(());
        };

        match gateway.delete(T::COLLECTION, id).await {
            Ok(()) => {
                tracing::info!(collection = T::COLLECTION, %id, "Deleted");
                Ok(())
            }
            Err(err) => {
                self.store.with_mut(|c| {
                    let slot = c.slot_mut();
                    let pos = pos.min(slot.len());
                    slot.insert(pos, pre_image);
                });
                self.persist::<T>()?;
                self.report_failure("delete", &err);
                Err(err.into())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Collection-specific commands
    // -----------------------------------------------------------------------

    /// Append a transaction to an account's ledger: the transaction is
    /// recorded and the account's running totals move in the same command.
    /// Atomic from the caller's perspective; a failure on either remote
    /// call reverts both collections.
    pub async fn append_transaction(
        &self,
        account_id: &EntityId,
        kind: TransactionKind,
        amount: f64,
        description: String,
        date: Timestamp,
    ) -> StoreResult<(Transaction, Account)> {
        // Reject before any state changes.
        validate_amount(amount)?;

        let mut tx = Transaction {
            id: EntityId::from(format!("tmp-{}", uuid::Uuid::now_v7())),
            account_id: account_id.clone(),
            kind,
            amount,
            description,
            date,
        };

        let (pre_account, account) = self.store.with_mut(|c| -> StoreResult<(Account, Account)> {
            let pos = c
                .accounts
                .iter()
                .position(|a| &a.id == account_id)
                .ok_or_else(|| CoreError::NotFound {
                    entity: "accounts",
                    id: account_id.clone(),
                })?;
            let pre_account = c.accounts[pos].clone();
            c.accounts[pos].apply_transaction(&tx)?;
            c.accounts[pos].updated_at = date;
            c.transactions.push(tx.clone());
            Ok((pre_account, c.accounts[pos].clone()))
        })?;
        self.persist::<Transaction>()?;
        self.persist::<Account>()?;

        let Some(gateway) = self.gateway.clone() else {
            tracing::info!(account = %account_id, kind = kind.as_str(), amount, "Transaction appended (local-only)");
            return Ok((tx, account));
        };

        let remote = async {
            let canonical = gateway
                .create("transactions", serde_json::to_value(&tx)?)
                .await?;
            gateway
                .update("accounts", account_id, serde_json::to_value(&account)?)
                .await?;
            Ok::<_, StoreError>(canonical)
        };

        match remote.await {
            Ok(canonical) => {
                if let Ok(canonical) = serde_json::from_value::<Transaction>(canonical) {
                    self.store.with_mut(|c| {
                        if let Some(pos) = c.transactions.iter().position(|t| t.id == tx.id) {
                            c.transactions[pos] = canonical.clone();
                        }
                    });
                    tx = canonical;
                    self.persist::<Transaction>()?;
                }
                tracing::info!(account = %account_id, kind = kind.as_str(), amount, "Transaction appended");
                Ok((tx, account))
            }
            Err(err) => {
                self.store.with_mut(|c| {
                    c.transactions.retain(|t| t.id != tx.id);
                    if let Some(pos) = c.accounts.iter().position(|a| &a.id == account_id) {
                        c.accounts[pos] = pre_account;
                    }
                });
                self.persist::<Transaction>()?;
                self.persist::<Account>()?;
                if let StoreError::Gateway(gateway_err) = &err {
                    self.report_failure("append_transaction", gateway_err);
                }
                Err(err)
            }
        }
    }

    /// Merge a batch of externally-sourced project records into the
    /// project collection. Per-record outcomes land in the returned
    /// report; nothing in the batch aborts it.
    pub fn bulk_sync_projects(&self, incoming: Vec<ExternalProject>) -> StoreResult<BulkSyncReport> {
        let now = chrono::Utc::now();
        let report = self
            .store
            .with_mut(|c| sync_external_projects(&mut c.projects, incoming, now));
        self.persist::<Project>()?;
        tracing::info!(
            synced = report.synced,
            skipped = report.skipped,
            total = report.total,
            "Bulk project sync complete"
        );
        Ok(report)
    }

    /// Record a client's brief submission, located by share token. Same
    /// optimistic shape as [`update`](Self::update), but the remote leg is
    /// the unauthenticated brief endpoint rather than an account update.
    pub async fn submit_brief(
        &self,
        token: &str,
        responses: BTreeMap<String, BriefAnswer>,
        now: Timestamp,
    ) -> StoreResult<Account> {
        let (pre_image, updated) = self.store.with_mut(|c| -> StoreResult<(Account, Account)> {
            let pos = c
                .accounts
                .iter()
                .position(|a| a.brief.token.as_deref() == Some(token))
                .ok_or_else(|| CoreError::NotFound {
                    entity: "briefs",
                    id: EntityId::from(token),
                })?;
            let pre_image = c.accounts[pos].clone();
            c.accounts[pos].submit_brief(responses, now)?;
            Ok((pre_image, c.accounts[pos].clone()))
        })?;
        self.persist::<Account>()?;

        let Some(gateway) = self.gateway.clone() else {
            tracing::info!(account = %updated.id, "Brief submitted (local-only)");
            return Ok(updated);
        };

        let answers = serde_json::to_value(&updated.brief.responses)?;
        match gateway.submit_brief(token, answers).await {
            Ok(()) => {
                tracing::info!(account = %updated.id, "Brief submitted");
                Ok(updated)
            }
            Err(err) => {
                let account_id = pre_image.id.clone();
                self.store.with_mut(|c| {
                    if let Some(pos) = c.accounts.iter().position(|a| a.id == account_id) {
                        c.accounts[pos] = pre_image;
                    }
                });
                self.persist::<Account>()?;
                self.report_failure("submit_brief", &err);
                Err(err.into())
            }
        }
    }
}
