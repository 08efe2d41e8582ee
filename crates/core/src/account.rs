//! Client account entity: contact details, portal credentials, running
//! financial totals, and the embedded brief-intake sub-record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Accounts are never hard-deleted from the admin surface; archiving is the
/// soft-delete concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Active,
    Archived,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

// ---------------------------------------------------------------------------
// Brief intake
// ---------------------------------------------------------------------------

/// Lifecycle state of an account's intake brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BriefState {
    #[default]
    None,
    Pending,
    Submitted,
    Approved,
}

impl BriefState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
        }
    }
}

impl std::fmt::Display for BriefState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single answer to an intake question: free text or a multi-select list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BriefAnswer {
    Text(String),
    Multi(Vec<String>),
}

/// The brief-intake sub-record embedded in every account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BriefIntake {
    /// Which intake form was assigned (e.g. `"brand"`, `"web"`).
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub state: BriefState,
    /// The share token the client submits against. Set when the brief is
    /// assigned.
    #[serde(default)]
    pub token: Option<String>,
    /// Question identifier to answer.
    #[serde(default)]
    pub responses: BTreeMap<String, BriefAnswer>,
    #[serde(default)]
    pub assigned_at: Option<Timestamp>,
    #[serde(default)]
    pub submitted_at: Option<Timestamp>,
    #[serde(default)]
    pub approved_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: EntityId,
    pub contact_name: String,
    #[serde(default)]
    pub company: String,
    /// Portal login credentials. Verification is handled by the auth
    /// collaborator, not here.
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Running totals maintained by the ledger. `balance` is always
    /// `total_debt - total_paid`; it is recomputed on every append and
    /// never updated independently.
    #[serde(default)]
    pub total_debt: f64,
    #[serde(default)]
    pub total_paid: f64,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default)]
    pub brief: BriefIntake,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    pub fn new(id: EntityId, contact_name: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id,
            contact_name: contact_name.into(),
            company: String::new(),
            username: String::new(),
            password: String::new(),
            total_debt: 0.0,
            total_paid: 0.0,
            balance: 0.0,
            status: AccountStatus::Active,
            brief: BriefIntake::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Assign an intake form to this account, moving the brief from
    /// `none` to `pending`.
    pub fn assign_brief(
        &mut self,
        form: impl Into<String>,
        token: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), CoreError> {
        if self.brief.state != BriefState::None {
            return Err(CoreError::Conflict(format!(
                "Brief is already {}; only an unassigned brief can be assigned",
                self.brief.state
            )));
        }
        self.brief.form = Some(form.into());
        self.brief.token = Some(token.into());
        self.brief.state = BriefState::Pending;
        self.brief.assigned_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Record the client's submitted answers, moving the brief from
    /// `pending` to `submitted`. Any other starting state is a conflict.
    pub fn submit_brief(
        &mut self,
        responses: BTreeMap<String, BriefAnswer>,
        now: Timestamp,
    ) -> Result<(), CoreError> {
        if self.brief.state != BriefState::Pending {
            return Err(CoreError::Conflict(format!(
                "Brief is {}; only a pending brief can be submitted",
                self.brief.state
            )));
        }
        self.brief.responses = responses;
        self.brief.state = BriefState::Submitted;
        self.brief.submitted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Approve a submitted brief.
    pub fn approve_brief(&mut self, now: Timestamp) -> Result<(), CoreError> {
        if self.brief.state != BriefState::Submitted {
            return Err(CoreError::Conflict(format!(
                "Brief is {}; only a submitted brief can be approved",
                self.brief.state
            )));
        }
        self.brief.state = BriefState::Approved;
        self.brief.approved_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn account() -> Account {
        Account::new(EntityId::from(1), "Ada", chrono::Utc::now())
    }

    fn answers() -> BTreeMap<String, BriefAnswer> {
        let mut map = BTreeMap::new();
        map.insert("q1".to_string(), BriefAnswer::Text("Bold".to_string()));
        map.insert(
            "q2".to_string(),
            BriefAnswer::Multi(vec!["print".to_string(), "web".to_string()]),
        );
        map
    }

    #[test]
    fn test_brief_lifecycle() {
        let now = chrono::Utc::now();
        let mut a = account();
        assert_eq!(a.brief.state, BriefState::None);

        a.assign_brief("brand", "tok-1", now).unwrap();
        assert_eq!(a.brief.state, BriefState::Pending);
        assert_eq!(a.brief.token.as_deref(), Some("tok-1"));

        a.submit_brief(answers(), now).unwrap();
        assert_eq!(a.brief.state, BriefState::Submitted);
        assert_eq!(a.brief.responses.len(), 2);

        a.approve_brief(now).unwrap();
        assert_eq!(a.brief.state, BriefState::Approved);
    }

    #[test]
    fn test_submit_requires_pending() {
        let now = chrono::Utc::now();
        let mut a = account();
        assert_matches!(
            a.submit_brief(answers(), now),
            Err(CoreError::Conflict(_))
        );

        a.assign_brief("brand", "tok-1", now).unwrap();
        a.submit_brief(answers(), now).unwrap();
        // Double submit conflicts.
        assert_matches!(
            a.submit_brief(answers(), now),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn test_assign_requires_unassigned() {
        let now = chrono::Utc::now();
        let mut a = account();
        a.assign_brief("brand", "tok-1", now).unwrap();
        assert_matches!(
            a.assign_brief("web", "tok-2", now),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn test_approve_requires_submitted() {
        let now = chrono::Utc::now();
        let mut a = account();
        assert_matches!(a.approve_brief(now), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn test_brief_answer_serde_shapes() {
        let text: BriefAnswer = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(text, BriefAnswer::Text("hello".to_string()));
        let multi: BriefAnswer = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(
            multi,
            BriefAnswer::Multi(vec!["a".to_string(), "b".to_string()])
        );
    }
}
