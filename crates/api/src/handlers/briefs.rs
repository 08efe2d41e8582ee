//! Handlers for the brief-intake lifecycle.
//!
//! Assignment and approval live under `/accounts/{id}/brief`; submission is
//! the client-facing `/briefs/{token}` endpoint located by share token, so
//! the client never needs to know the account identifier.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use atelier_core::account::{Account, BriefAnswer, BriefState};
use atelier_core::EntityId;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AssignBrief {
    /// Which intake form to assign (e.g. `"brand"`, `"web"`).
    pub form: String,
}

/// POST /api/v1/accounts/{id}/brief
pub async fn assign(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<AssignBrief>,
) -> AppResult<Json<Account>> {
    let id = EntityId::from(id.as_str());
    let now = chrono::Utc::now();
    let token = uuid::Uuid::now_v7().to_string();
    let account = state
        .engine
        .update::<Account>(&id, move |a| a.assign_brief(input.form, token, now))
        .await?;
    Ok(Json(account))
}

/// POST /api/v1/accounts/{id}/brief/approve
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Account>> {
    let id = EntityId::from(id.as_str());
    let now = chrono::Utc::now();
    let account = state
        .engine
        .update::<Account>(&id, move |a| a.approve_brief(now))
        .await?;
    Ok(Json(account))
}

/// Submission acknowledgement. Deliberately minimal: this endpoint is
/// client-facing and must not echo account credentials or totals.
#[derive(Debug, Serialize)]
pub struct SubmitReceipt {
    pub state: BriefState,
}

/// POST /api/v1/briefs/{token}
pub async fn submit(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(responses): Json<BTreeMap<String, BriefAnswer>>,
) -> AppResult<Json<SubmitReceipt>> {
    let now = chrono::Utc::now();
    let account = state.engine.submit_brief(&token, responses, now).await?;
    Ok(Json(SubmitReceipt {
        state: account.brief.state,
    }))
}
