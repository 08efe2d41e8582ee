//! Reconciliation-on-load: merge a freshly fetched remote collection with
//! whatever is already resident in memory.
//!
//! The remote version of an entity is the base. Remote collection fetches
//! are narrow projections that omit heavy embedded payloads, so any field
//! the remote copy left empty but the local copy filled is preserved.
//! Entities the remote store has not acknowledged yet are appended, and
//! seed/demo records are never duplicated. The merge itself is pure;
//! callers decide the fail-open behaviour when the remote fetch fails.

use crate::account::Account;
use crate::expense::Expense;
use crate::ledger::Transaction;
use crate::message::Message;
use crate::project::{is_demo_id, Project, DEMO_PROJECT_ID};
use crate::proposal::Proposal;
use crate::team::TeamMember;
use crate::types::{EntityId, Timestamp};

/// Per-entity hooks the generic merge dispatches on.
pub trait Reconcile: Clone {
    fn id(&self) -> &EntityId;

    /// Seed/demo records get dedup protection during the merge.
    fn is_seed(&self) -> bool {
        false
    }

    /// Called on the remote base when a local copy of the same entity
    /// exists. Implementations copy over fields the remote projection
    /// omitted but the local copy has values for.
    fn absorb_local(&mut self, _local: &Self) {}
}

/// Merge a remote collection fetch into the locally resident collection.
///
/// Remote entities come first, in remote order, each enriched from its
/// local counterpart via [`Reconcile::absorb_local`]. Local-only entities
/// are appended in local order, except seed records the remote side
/// already covers.
pub fn merge_remote<T: Reconcile>(local: &[T], remote: Vec<T>) -> Vec<T> {
    let mut merged: Vec<T> = remote;

    for entity in merged.iter_mut() {
        if let Some(local_version) = local.iter().find(|l| l.id() == entity.id()) {
            entity.absorb_local(local_version);
        }
    }

    for local_entity in local {
        let already_present = merged.iter().any(|m| m.id() == local_entity.id());
        if already_present {
            continue;
        }
        // A seed record equivalent to one the remote side already carries
        // must not be duplicated under a second identifier.
        if local_entity.is_seed() && merged.iter().any(|m| m.is_seed()) {
            continue;
        }
        merged.push(local_entity.clone());
    }

    merged
}

/// Project-collection merge: [`merge_remote`] plus the showcase-record
/// guarantee. The designated demo project ends up present exactly once,
/// front-inserted when neither side carried it.
pub fn merge_projects(local: &[Project], remote: Vec<Project>, now: Timestamp) -> Vec<Project> {
    let mut merged = merge_remote(local, remote);
    if !merged.iter().any(|p| p.id.as_str() == DEMO_PROJECT_ID) {
        merged.insert(0, Project::demo(now));
    }
    merged
}

// ---------------------------------------------------------------------------
// Per-entity implementations
// ---------------------------------------------------------------------------

impl Reconcile for Project {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn is_seed(&self) -> bool {
        is_demo_id(&self.id)
    }

    fn absorb_local(&mut self, local: &Self) {
        // Narrow remote projections drop the heavy embedded payloads.
        if self.brand.is_none() && local.brand.is_some() {
            self.brand = local.brand.clone();
        }
        if self.blocks.is_empty() && !local.blocks.is_empty() {
            self.blocks = local.blocks.clone();
        }
        if self.brand_page_id.is_none() && local.brand_page_id.is_some() {
            self.brand_page_id = local.brand_page_id.clone();
        }
    }
}

impl Reconcile for Account {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn absorb_local(&mut self, local: &Self) {
        // Brief responses can be large and are excluded from the account
        // list projection.
        if self.brief.responses.is_empty() && !local.brief.responses.is_empty() {
            self.brief.responses = local.brief.responses.clone();
        }
    }
}

impl Reconcile for Proposal {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Reconcile for Transaction {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Reconcile for Expense {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Reconcile for Message {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Reconcile for TeamMember {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::page::BrandPage;
    use crate::project::{BlockKind, ContentBlock};

    fn now() -> Timestamp {
        chrono::Utc::now()
    }

    fn project(id: &str, title: &str) -> Project {
        Project::new(EntityId::from(id), title, now())
    }

    #[test]
    fn test_merge_is_idempotent_when_local_equals_remote() {
        let collection = vec![Project::demo(now()), project("1", "One"), project("2", "Two")];
        let merged = merge_projects(&collection, collection.clone(), now());
        assert_eq!(merged, collection);
    }

    #[test]
    fn test_remote_is_base_and_local_heavy_fields_survive() {
        let mut local = project("1", "Old title");
        local.brand = Some(BrandPage::demo());
        local.blocks = vec![ContentBlock {
            id: EntityId::from("b1"),
            kind: BlockKind::Heading,
            data: serde_json::json!({"text": "Hello"}),
        }];

        // The remote projection renamed the project but omitted the brand
        // payload and blocks.
        let remote = project("1", "New title");

        let merged = merge_remote(&[local.clone()], vec![remote]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "New title");
        assert_eq!(merged[0].brand, local.brand);
        assert_eq!(merged[0].blocks, local.blocks);
    }

    #[test]
    fn test_local_only_entities_are_appended() {
        let local = vec![project("1", "Synced"), project("tmp-9", "Unsynced")];
        let remote = vec![project("1", "Synced")];
        let merged = merge_remote(&local, remote);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].id, EntityId::from("tmp-9"));
    }

    #[test]
    fn test_demo_record_present_exactly_once_in_every_order() {
        let demo = Project::demo(now());
        let plain = project("1", "One");

        let cases: Vec<(Vec<Project>, Vec<Project>)> = vec![
            (vec![], vec![]),
            (vec![demo.clone()], vec![]),
            (vec![], vec![demo.clone()]),
            (vec![demo.clone()], vec![demo.clone()]),
            (vec![demo.clone(), plain.clone()], vec![plain.clone()]),
            (vec![plain.clone()], vec![plain.clone(), demo.clone()]),
        ];
        for (local, remote) in cases {
            let merged = merge_projects(&local, remote, now());
            let demo_count = merged.iter().filter(|p| p.is_demo()).count();
            assert_eq!(demo_count, 1);
        }
    }

    #[test]
    fn test_demo_record_front_inserted_when_absent_everywhere() {
        let merged = merge_projects(&[project("1", "One")], vec![], now());
        assert!(merged[0].is_demo());
    }

    #[test]
    fn test_local_seed_variant_not_duplicated_against_remote_seed() {
        // The local cache holds an older demo record under a different
        // demo id; the remote store already has the canonical one.
        let stale_demo = project("demo-aurora-v1", "Old showcase");
        let merged = merge_projects(&[stale_demo], vec![Project::demo(now())], now());
        assert_eq!(merged.iter().filter(|p| p.is_demo()).count(), 1);
        assert_eq!(merged[0].id, EntityId::from(DEMO_PROJECT_ID));
    }

    #[test]
    fn test_numeric_and_string_ids_match_during_merge() {
        let local = vec![project("42", "Local")];
        let mut remote_entity = project("42", "Remote");
        remote_entity.id = EntityId::from(42i64);
        let merged = merge_remote(&local, vec![remote_entity]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "Remote");
    }

    #[test]
    fn test_account_brief_responses_survive_projection() {
        use crate::account::BriefAnswer;

        let mut local = Account::new(EntityId::from(5), "Ada", now());
        local
            .brief
            .responses
            .insert("q1".to_string(), BriefAnswer::Text("answer".to_string()));

        let remote = Account::new(EntityId::from(5), "Ada Lovelace", now());
        let merged = merge_remote(&[local.clone()], vec![remote]);
        assert_eq!(merged[0].contact_name, "Ada Lovelace");
        assert_eq!(merged[0].brief.responses, local.brief.responses);
    }
}
