//! Domain types and pure logic for the Atelier agency platform.
//!
//! This crate has zero I/O: no HTTP, no filesystem, no async. It defines
//! the entity model (projects, accounts, proposals, expenses, messages,
//! team members), the append-only transaction ledger, the
//! reconciliation-on-load merge, bulk external-project sync, brief intake
//! lifecycle, and the brand-page model with its template renderers.

pub mod account;
pub mod brand;
pub mod bulk;
pub mod error;
pub mod expense;
pub mod ledger;
pub mod merge;
pub mod message;
pub mod project;
pub mod proposal;
pub mod team;
pub mod types;

pub use error::CoreError;
pub use types::{EntityId, Timestamp};
