//! Handlers for the `/expenses` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use atelier_core::expense::Expense;
use atelier_core::ledger::validate_amount;
use atelier_core::{CoreError, EntityId, Timestamp};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateExpense {
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<Timestamp>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExpense {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<Timestamp>,
    #[serde(default)]
    pub note: Option<String>,
}

/// POST /api/v1/expenses
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateExpense>,
) -> AppResult<(StatusCode, Json<Expense>)> {
    validate_amount(input.amount)?;
    let expense = Expense {
        id: EntityId::from("0"),
        amount: input.amount,
        category: input.category.unwrap_or_default(),
        date: input.date.unwrap_or_else(chrono::Utc::now),
        note: input.note.unwrap_or_default(),
    };
    let expense = state.engine.create(expense).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /api/v1/expenses
pub async fn list(State(state): State<AppState>) -> Json<Vec<Expense>> {
    let expenses: Vec<Expense> = state.engine.store().list();
    Json(expenses)
}

/// GET /api/v1/expenses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Expense>> {
    let id = EntityId::from(id.as_str());
    let expense = state
        .engine
        .store()
        .get::<Expense>(&id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "expenses",
            id,
        }))?;
    Ok(Json(expense))
}

/// PUT /api/v1/expenses/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateExpense>,
) -> AppResult<Json<Expense>> {
    let id = EntityId::from(id.as_str());
    let expense = state
        .engine
        .update::<Expense>(&id, move |e| {
            if let Some(amount) = input.amount {
                validate_amount(amount)?;
                e.amount = amount;
            }
            if let Some(category) = input.category {
                e.category = category;
            }
            if let Some(date) = input.date {
                e.date = date;
            }
            if let Some(note) = input.note {
                e.note = note;
            }
            Ok(())
        })
        .await?;
    Ok(Json(expense))
}

/// DELETE /api/v1/expenses/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = EntityId::from(id.as_str());
    state.engine.delete::<Expense>(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
