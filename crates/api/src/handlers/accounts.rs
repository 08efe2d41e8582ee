//! Handlers for the `/accounts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use atelier_core::account::{Account, AccountStatus};
use atelier_core::{CoreError, EntityId};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAccount {
    pub contact_name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAccount {
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /api/v1/accounts
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAccount>,
) -> AppResult<(StatusCode, Json<Account>)> {
    if input.contact_name.trim().is_empty() {
        return Err(CoreError::Validation("Contact name must not be empty".into()).into());
    }
    let now = chrono::Utc::now();
    let mut account = Account::new(EntityId::from("0"), input.contact_name, now);
    if let Some(company) = input.company {
        account.company = company;
    }
    if let Some(username) = input.username {
        account.username = username;
    }
    if let Some(password) = input.password {
        account.password = password;
    }

    let account = state.engine.create(account).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /api/v1/accounts
pub async fn list(State(state): State<AppState>) -> Json<Vec<Account>> {
    let accounts: Vec<Account> = state.engine.store().list();
    Json(accounts)
}

/// GET /api/v1/accounts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Account>> {
    let id = EntityId::from(id.as_str());
    let account = state
        .engine
        .store()
        .get::<Account>(&id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "accounts",
            id,
        }))?;
    Ok(Json(account))
}

/// PUT /api/v1/accounts/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateAccount>,
) -> AppResult<Json<Account>> {
    let id = EntityId::from(id.as_str());
    let now = chrono::Utc::now();
    let account = state
        .engine
        .update::<Account>(&id, move |a| {
            if let Some(contact_name) = input.contact_name {
                if contact_name.trim().is_empty() {
                    return Err(CoreError::Validation("Contact name must not be empty".into()));
                }
                a.contact_name = contact_name;
            }
            if let Some(company) = input.company {
                a.company = company;
            }
            if let Some(username) = input.username {
                a.username = username;
            }
            if let Some(password) = input.password {
                a.password = password;
            }
            a.updated_at = now;
            Ok(())
        })
        .await?;
    Ok(Json(account))
}

/// DELETE /api/v1/accounts/{id}
///
/// Accounts are never hard-deleted: delete archives, preserving the ledger
/// history attached to the account.
pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = EntityId::from(id.as_str());
    let now = chrono::Utc::now();
    state
        .engine
        .update::<Account>(&id, move |a| {
            a.status = AccountStatus::Archived;
            a.updated_at = now;
            Ok(())
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
