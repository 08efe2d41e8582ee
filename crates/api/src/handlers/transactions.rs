//! Handlers for the account-scoped ledger.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use atelier_core::account::Account;
use atelier_core::ledger::{Transaction, TransactionKind};
use atelier_core::{CoreError, EntityId, Timestamp};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AppendTransaction {
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<Timestamp>,
}

/// The transaction together with the account totals it moved.
#[derive(Debug, Serialize)]
pub struct TransactionReceipt {
    pub transaction: Transaction,
    pub account: Account,
}

/// POST /api/v1/accounts/{id}/transactions
pub async fn append(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<AppendTransaction>,
) -> AppResult<(StatusCode, Json<TransactionReceipt>)> {
    let account_id = EntityId::from(id.as_str());
    let (transaction, account) = state
        .engine
        .append_transaction(
            &account_id,
            input.kind,
            input.amount,
            input.description.unwrap_or_default(),
            input.date.unwrap_or_else(chrono::Utc::now),
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(TransactionReceipt {
            transaction,
            account,
        }),
    ))
}

/// GET /api/v1/accounts/{id}/transactions
pub async fn list_for_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Transaction>>> {
    let account_id = EntityId::from(id.as_str());
    if state.engine.store().get::<Account>(&account_id).is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "accounts",
            id: account_id,
        }));
    }
    let transactions: Vec<Transaction> = state.engine.store().list();
    let for_account = transactions
        .into_iter()
        .filter(|t| t.account_id == account_id)
        .collect();
    Ok(Json(for_account))
}
