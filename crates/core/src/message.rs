//! Inbox message record.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: EntityId,
    pub sender: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub read: bool,
    pub sent_at: Timestamp,
}
