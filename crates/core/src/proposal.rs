//! Proposal entity: an ordered list of line items with an aggregate total
//! and currency formatting metadata.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

/// One line of a proposal. `total` may be entered directly by the admin;
/// when absent it is computed as quantity times unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(default)]
    pub total: Option<f64>,
}

impl LineItem {
    pub fn effective_total(&self) -> f64 {
        self.total.unwrap_or(self.quantity * self.unit_price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub issued_at: Option<Timestamp>,
    #[serde(default)]
    pub valid_until: Option<Timestamp>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: ProposalStatus,
    /// ISO 4217 currency code used when formatting amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub locale: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Proposal {
    pub fn new(id: EntityId, title: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id,
            title: title.into(),
            client: String::new(),
            issued_at: None,
            valid_until: None,
            items: Vec::new(),
            total_amount: 0.0,
            status: ProposalStatus::Draft,
            currency: default_currency(),
            locale: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recompute the aggregate total from the line items.
    pub fn recompute_total(&mut self) {
        self.total_amount = self.items.iter().map(LineItem::effective_total).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total_computed_or_direct() {
        let computed = LineItem {
            description: "Logo design".to_string(),
            quantity: 3.0,
            unit_price: 200.0,
            total: None,
        };
        assert_eq!(computed.effective_total(), 600.0);

        let direct = LineItem {
            description: "Flat-fee retainer".to_string(),
            quantity: 1.0,
            unit_price: 0.0,
            total: Some(1500.0),
        };
        assert_eq!(direct.effective_total(), 1500.0);
    }

    #[test]
    fn test_recompute_total_sums_items() {
        let now = chrono::Utc::now();
        let mut p = Proposal::new(EntityId::from(1), "Rebrand", now);
        p.items = vec![
            LineItem {
                description: "Discovery".to_string(),
                quantity: 2.0,
                unit_price: 150.0,
                total: None,
            },
            LineItem {
                description: "Identity system".to_string(),
                quantity: 1.0,
                unit_price: 0.0,
                total: Some(2400.0),
            },
        ];
        p.recompute_total();
        assert_eq!(p.total_amount, 2700.0);
    }
}
