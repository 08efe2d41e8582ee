//! Expense record for the finance tab.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: EntityId,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    pub date: Timestamp,
    #[serde(default)]
    pub note: String,
}
