//! The optimistic client-state synchronization layer.
//!
//! Every surface reads and writes the entity collections through one
//! [`SyncEngine`]. A mutation is applied to the in-memory [`EntityStore`]
//! immediately, mirrored to the durable [`SnapshotCache`], and then synced
//! to the remote document store through a [`RemoteGateway`]; a remote
//! failure reverts the optimistic change and populates the process-wide
//! last-error slot. On load, remote collection fetches are reconciled with
//! resident state so locally-held payloads and unsynced records survive.

pub mod cache;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod load;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::SnapshotCache;
pub use engine::SyncEngine;
pub use error::StoreError;
pub use gateway::{GatewayError, HttpGateway, RemoteGateway};
pub use store::{Collections, Entity, EntityStore, HasSlot};
