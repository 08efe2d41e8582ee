//! Append-only transaction ledger and the account financial invariant.
//!
//! Transactions are never edited or reversed; a mistake is corrected by
//! appending a compensating transaction. An account's running totals are
//! either updated incrementally on append or recomputed by folding the
//! whole sequence, and `balance == total_debt - total_paid` holds after
//! every mutation.

use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

/// Kind of a ledger entry. Serialized with the wire literals the admin
/// surface and remote store use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// The client owes the agency.
    Debt,
    /// The client paid the agency.
    Payment,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debt => "Debt",
            Self::Payment => "Payment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: EntityId,
    pub account_id: EntityId,
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: Timestamp,
}

/// Validate a transaction amount: strictly positive and finite.
pub fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() {
        return Err(CoreError::Validation(
            "Transaction amount must be a finite number".to_string(),
        ));
    }
    if amount <= 0.0 {
        return Err(CoreError::Validation(
            "Transaction amount must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

impl Account {
    /// Apply a transaction to the running totals.
    ///
    /// Validates the amount first; on a validation error no field changes.
    /// The balance is recomputed from the updated totals in the same call
    /// so it can never drift.
    pub fn apply_transaction(&mut self, tx: &Transaction) -> Result<(), CoreError> {
        validate_amount(tx.amount)?;
        match tx.kind {
            TransactionKind::Debt => self.total_debt += tx.amount,
            TransactionKind::Payment => self.total_paid += tx.amount,
        }
        self.balance = self.total_debt - self.total_paid;
        Ok(())
    }

    /// Recompute the running totals from scratch by folding a transaction
    /// sequence. Entries for other accounts are ignored.
    pub fn recompute_totals(&mut self, transactions: &[Transaction]) {
        self.total_debt = 0.0;
        self.total_paid = 0.0;
        for tx in transactions.iter().filter(|t| t.account_id == self.id) {
            match tx.kind {
                TransactionKind::Debt => self.total_debt += tx.amount,
                TransactionKind::Payment => self.total_paid += tx.amount,
            }
        }
        self.balance = self.total_debt - self.total_paid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn tx(kind: TransactionKind, amount: f64) -> Transaction {
        Transaction {
            id: EntityId::from("t1"),
            account_id: EntityId::from(1),
            kind,
            amount,
            description: String::new(),
            date: chrono::Utc::now(),
        }
    }

    fn account() -> Account {
        Account::new(EntityId::from(1), "Ada", chrono::Utc::now())
    }

    #[test]
    fn test_debt_then_payment_example() {
        let mut a = account();
        a.apply_transaction(&tx(TransactionKind::Debt, 1000.0)).unwrap();
        a.apply_transaction(&tx(TransactionKind::Payment, 400.0)).unwrap();
        assert_eq!(a.total_debt, 1000.0);
        assert_eq!(a.total_paid, 400.0);
        assert_eq!(a.balance, 600.0);
    }

    #[test]
    fn test_balance_equals_fold_over_any_sequence() {
        let seq = [
            (TransactionKind::Debt, 250.0),
            (TransactionKind::Debt, 120.5),
            (TransactionKind::Payment, 300.0),
            (TransactionKind::Debt, 40.0),
            (TransactionKind::Payment, 10.5),
        ];
        let mut a = account();
        for (kind, amount) in seq {
            a.apply_transaction(&tx(kind, amount)).unwrap();
            assert_eq!(a.balance, a.total_debt - a.total_paid);
        }
        assert_eq!(a.total_debt, 410.5);
        assert_eq!(a.total_paid, 310.5);
        assert_eq!(a.balance, 100.0);
    }

    #[test]
    fn test_invalid_amounts_rejected_without_state_change() {
        let mut a = account();
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert_matches!(
                a.apply_transaction(&tx(TransactionKind::Debt, bad)),
                Err(CoreError::Validation(_))
            );
        }
        assert_eq!(a.total_debt, 0.0);
        assert_eq!(a.total_paid, 0.0);
        assert_eq!(a.balance, 0.0);
    }

    #[test]
    fn test_recompute_matches_incremental_and_filters_other_accounts() {
        let mut a = account();
        let mine = EntityId::from(1);
        let theirs = EntityId::from(2);
        let txs = vec![
            Transaction {
                id: EntityId::from("t1"),
                account_id: mine.clone(),
                kind: TransactionKind::Debt,
                amount: 900.0,
                description: "Logo package".to_string(),
                date: chrono::Utc::now(),
            },
            Transaction {
                id: EntityId::from("t2"),
                account_id: theirs,
                kind: TransactionKind::Debt,
                amount: 5000.0,
                description: String::new(),
                date: chrono::Utc::now(),
            },
            Transaction {
                id: EntityId::from("t3"),
                account_id: mine,
                kind: TransactionKind::Payment,
                amount: 450.0,
                description: String::new(),
                date: chrono::Utc::now(),
            },
        ];
        a.recompute_totals(&txs);
        assert_eq!(a.total_debt, 900.0);
        assert_eq!(a.total_paid, 450.0);
        assert_eq!(a.balance, 450.0);
    }

    #[test]
    fn test_kind_wire_literals() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Debt).unwrap(),
            "\"Debt\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::Payment).unwrap(),
            "\"Payment\""
        );
    }
}
