//! The in-memory entity store: the single source of truth every UI
//! surface reads from.
//!
//! All collections live in one [`Collections`] value behind a lock, so a
//! mutation by one surface is immediately visible to every other without
//! an explicit refresh. Mutations are synchronous; network calls never
//! happen while the lock is held.

use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use atelier_core::account::Account;
use atelier_core::expense::Expense;
use atelier_core::ledger::Transaction;
use atelier_core::merge::Reconcile;
use atelier_core::message::Message;
use atelier_core::project::Project;
use atelier_core::proposal::Proposal;
use atelier_core::team::TeamMember;
use atelier_core::EntityId;

/// Every entity collection, in one place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub team: Vec<TeamMember>,
}

/// Marker for types stored in a named collection. The collection name is
/// both the snapshot-cache key and the remote gateway path segment.
pub trait Entity: Reconcile + Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn set_id(&mut self, id: EntityId);
}

/// Typed access to the matching field of [`Collections`]. Lets the sync
/// engine stay generic over the entity type without reflection.
pub trait HasSlot<T> {
    fn slot(&self) -> &Vec<T>;
    fn slot_mut(&mut self) -> &mut Vec<T>;
}

macro_rules! collection {
    ($ty:ty, $field:ident, $name:literal) => {
        impl Entity for $ty {
            const COLLECTION: &'static str = $name;

            fn set_id(&mut self, id: EntityId) {
                self.id = id;
            }
        }

        impl HasSlot<$ty> for Collections {
            fn slot(&self) -> &Vec<$ty> {
                &self.$field
            }

            fn slot_mut(&mut self) -> &mut Vec<$ty> {
                &mut self.$field
            }
        }
    };
}

collection!(Project, projects, "projects");
collection!(Account, accounts, "accounts");
collection!(Transaction, transactions, "transactions");
collection!(Proposal, proposals, "proposals");
collection!(Expense, expenses, "expenses");
collection!(Message, messages, "messages");
collection!(TeamMember, team, "team");

/// The shared state container. Cheap to share via `Arc`; reads and writes
/// go through closures so lock guards never escape.
#[derive(Debug, Default)]
pub struct EntityStore {
    inner: RwLock<Collections>,
}

impl EntityStore {
    pub fn new(collections: Collections) -> Self {
        Self {
            inner: RwLock::new(collections),
        }
    }

    /// Run a closure over the current collections.
    pub fn with<R>(&self, f: impl FnOnce(&Collections) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    /// Run a closure with mutable access. The closure must not block; all
    /// network work happens outside the lock.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Collections) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    /// Clone the current contents of one collection.
    pub fn list<T: Clone>(&self) -> Vec<T>
    where
        Collections: HasSlot<T>,
    {
        self.with(|c| c.slot().clone())
    }

    /// Find one entity by string-normalized identifier.
    pub fn get<T: Entity>(&self, id: &EntityId) -> Option<T>
    where
        Collections: HasSlot<T>,
    {
        self.with(|c| c.slot().iter().find(|e| e.id() == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::Timestamp;

    fn now() -> Timestamp {
        chrono::Utc::now()
    }

    #[test]
    fn test_get_matches_numeric_and_string_ids() {
        let mut collections = Collections::default();
        collections
            .projects
            .push(Project::new(EntityId::from(42i64), "P", now()));
        let store = EntityStore::new(collections);

        let by_string: Option<Project> = store.get(&EntityId::from("42"));
        assert!(by_string.is_some());
        let by_number: Option<Project> = store.get(&EntityId::from(42i64));
        assert!(by_number.is_some());
        let missing: Option<Project> = store.get(&EntityId::from("43"));
        assert!(missing.is_none());
    }

    #[test]
    fn test_mutation_visible_to_subsequent_reads() {
        let store = EntityStore::default();
        store.with_mut(|c| {
            c.projects.push(Project::new(EntityId::from(1), "One", now()));
        });
        let projects: Vec<Project> = store.list();
        assert_eq!(projects.len(), 1);
    }
}
