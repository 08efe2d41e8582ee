//! Bulk sync of externally-sourced project records.
//!
//! The admin surface can push an array of project-like records exported
//! from another tool. Each record is processed independently: records
//! without an identifier and demo records are skipped, the rest merge a
//! fixed allow-list of fields into an id-matched existing project or are
//! inserted as new. Failures and skips accumulate into a per-record
//! action log; nothing aborts the batch.

use serde::{Deserialize, Serialize};

use crate::project::{is_demo_id, Project, ProjectStatus};
use crate::types::{EntityId, Timestamp};

/// An externally-sourced project-like record. Every field is optional;
/// only the allow-listed fields present on the record are merged.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalProject {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<u8>,
}

/// What happened to one incoming record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SyncAction {
    Inserted { id: EntityId },
    Updated { id: EntityId },
    Skipped { id: Option<EntityId>, reason: String },
}

/// Outcome of a bulk sync: counts plus the per-record log.
#[derive(Debug, Clone, Serialize)]
pub struct BulkSyncReport {
    pub synced: usize,
    pub skipped: usize,
    pub total: usize,
    pub log: Vec<SyncAction>,
}

/// Merge a batch of external records into the project collection.
pub fn sync_external_projects(
    existing: &mut Vec<Project>,
    incoming: Vec<ExternalProject>,
    now: Timestamp,
) -> BulkSyncReport {
    let total = incoming.len();
    let mut log = Vec::with_capacity(total);

    for record in incoming {
        let id = match record.id.clone() {
            Some(id) => id,
            None => {
                log.push(SyncAction::Skipped {
                    id: None,
                    reason: "record has no identifier".to_string(),
                });
                continue;
            }
        };

        if is_demo_id(&id) {
            log.push(SyncAction::Skipped {
                id: Some(id),
                reason: "demo records are never synced".to_string(),
            });
            continue;
        }

        // Identifier match tolerates numeric/string mismatch because
        // EntityId equality is string-normalized.
        match existing.iter_mut().find(|p| p.id == id) {
            Some(project) => {
                apply_allow_list(project, &record, now);
                log.push(SyncAction::Updated { id });
            }
            None => {
                let mut project = Project::new(
                    id.clone(),
                    record.title.clone().unwrap_or_else(|| "Untitled".to_string()),
                    now,
                );
                apply_allow_list(&mut project, &record, now);
                existing.push(project);
                log.push(SyncAction::Inserted { id });
            }
        }
    }

    let skipped = log
        .iter()
        .filter(|a| matches!(a, SyncAction::Skipped { .. }))
        .count();
    BulkSyncReport {
        synced: total - skipped,
        skipped,
        total,
        log,
    }
}

/// Merge the fixed allow-list of fields. Anything else on the external
/// record (embedded payloads, links, publication state) is ignored.
fn apply_allow_list(project: &mut Project, record: &ExternalProject, now: Timestamp) {
    if let Some(title) = &record.title {
        project.title = title.clone();
    }
    if let Some(client) = &record.client {
        project.client = client.clone();
    }
    if let Some(category) = &record.category {
        project.category = category.clone();
    }
    if let Some(status) = record.status.as_deref().and_then(ProjectStatus::parse) {
        project.status = status;
    }
    if let Some(progress) = record.progress {
        project.set_progress(progress);
    }
    project.updated_at = now;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        chrono::Utc::now()
    }

    fn external(id: Option<&str>, title: Option<&str>) -> ExternalProject {
        ExternalProject {
            id: id.map(EntityId::from),
            title: title.map(str::to_string),
            client: None,
            category: None,
            status: None,
            progress: None,
        }
    }

    #[test]
    fn test_insert_update_skip_counts() {
        let mut existing = vec![Project::new(EntityId::from("7"), "Existing", now())];
        let incoming = vec![
            external(Some("99"), Some("Brand refresh")),
            external(Some("7"), Some("Existing, renamed")),
            external(Some("demo-aurora"), Some("Tampered showcase")),
        ];

        let report = sync_external_projects(&mut existing, incoming, now());

        assert_eq!(report.total, 3);
        assert_eq!(report.synced, 2);
        assert_eq!(report.skipped, 1);

        let inserted: Vec<_> = report
            .log
            .iter()
            .filter(|a| matches!(a, SyncAction::Inserted { .. }))
            .collect();
        let updated: Vec<_> = report
            .log
            .iter()
            .filter(|a| matches!(a, SyncAction::Updated { .. }))
            .collect();
        assert_eq!(inserted.len(), 1);
        assert_eq!(updated.len(), 1);
        assert_eq!(
            inserted[0],
            &SyncAction::Inserted { id: EntityId::from("99") }
        );
        assert_eq!(
            updated[0],
            &SyncAction::Updated { id: EntityId::from("7") }
        );

        // The demo record never lands in the collection under any action.
        assert!(!existing.iter().any(|p| p.is_demo()));
        assert_eq!(existing.len(), 2);
        assert_eq!(existing[0].title, "Existing, renamed");
    }

    #[test]
    fn test_record_without_id_is_skipped() {
        let mut existing = Vec::new();
        let report = sync_external_projects(&mut existing, vec![external(None, Some("X"))], now());
        assert_eq!(report.skipped, 1);
        assert_eq!(report.synced, 0);
        assert!(existing.is_empty());
    }

    #[test]
    fn test_numeric_id_matches_string_id() {
        let mut existing = vec![Project::new(EntityId::from("42"), "Old", now())];
        let incoming = vec![ExternalProject {
            id: Some(EntityId::from(42i64)),
            title: Some("New".to_string()),
            client: None,
            category: None,
            status: None,
            progress: None,
        }];
        let report = sync_external_projects(&mut existing, incoming, now());
        assert_eq!(report.synced, 1);
        assert_eq!(existing.len(), 1);
        assert_eq!(existing[0].title, "New");
    }

    #[test]
    fn test_allow_list_only_touches_named_fields() {
        let mut base = Project::new(EntityId::from("7"), "Keep blocks", now());
        base.published = true;
        base.progress = 30;
        let mut existing = vec![base];

        let incoming = vec![ExternalProject {
            id: Some(EntityId::from("7")),
            title: None,
            client: Some("New Client".to_string()),
            category: None,
            status: Some("review".to_string()),
            progress: None,
        }];
        sync_external_projects(&mut existing, incoming, now());

        let p = &existing[0];
        assert_eq!(p.title, "Keep blocks");
        assert_eq!(p.client, "New Client");
        assert_eq!(p.status, ProjectStatus::Review);
        assert_eq!(p.progress, 30);
        assert!(p.published);
    }

    #[test]
    fn test_invalid_status_string_is_ignored() {
        let mut existing = vec![Project::new(EntityId::from("7"), "P", now())];
        let incoming = vec![ExternalProject {
            id: Some(EntityId::from("7")),
            title: None,
            client: None,
            category: None,
            status: Some("on_fire".to_string()),
            progress: Some(55),
        }];
        let report = sync_external_projects(&mut existing, incoming, now());
        assert_eq!(report.synced, 1);
        assert_eq!(existing[0].status, ProjectStatus::Planning);
        assert_eq!(existing[0].progress, 55);
    }
}
