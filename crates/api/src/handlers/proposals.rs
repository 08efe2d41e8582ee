//! Handlers for the `/proposals` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use atelier_core::proposal::{LineItem, Proposal, ProposalStatus};
use atelier_core::{CoreError, EntityId, Timestamp};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProposal {
    pub title: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<LineItem>>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub issued_at: Option<Timestamp>,
    #[serde(default)]
    pub valid_until: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProposal {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<LineItem>>,
    #[serde(default)]
    pub status: Option<ProposalStatus>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub issued_at: Option<Timestamp>,
    #[serde(default)]
    pub valid_until: Option<Timestamp>,
}

/// POST /api/v1/proposals
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProposal>,
) -> AppResult<(StatusCode, Json<Proposal>)> {
    if input.title.trim().is_empty() {
        return Err(CoreError::Validation("Proposal title must not be empty".into()).into());
    }
    let now = chrono::Utc::now();
    let mut proposal = Proposal::new(EntityId::from("0"), input.title, now);
    if let Some(client) = input.client {
        proposal.client = client;
    }
    if let Some(items) = input.items {
        proposal.items = items;
    }
    if let Some(currency) = input.currency {
        proposal.currency = currency;
    }
    proposal.locale = input.locale;
    proposal.issued_at = input.issued_at;
    proposal.valid_until = input.valid_until;
    proposal.recompute_total();

    let proposal = state.engine.create(proposal).await?;
    Ok((StatusCode::CREATED, Json(proposal)))
}

/// GET /api/v1/proposals
pub async fn list(State(state): State<AppState>) -> Json<Vec<Proposal>> {
    let proposals: Vec<Proposal> = state.engine.store().list();
    Json(proposals)
}

/// GET /api/v1/proposals/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Proposal>> {
    let id = EntityId::from(id.as_str());
    let proposal = state
        .engine
        .store()
        .get::<Proposal>(&id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "proposals",
            id,
        }))?;
    Ok(Json(proposal))
}

/// PUT /api/v1/proposals/{id}
///
/// The aggregate total is recomputed whenever the line items change; it is
/// never accepted from the request body.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProposal>,
) -> AppResult<Json<Proposal>> {
    let id = EntityId::from(id.as_str());
    let now = chrono::Utc::now();
    let proposal = state
        .engine
        .update::<Proposal>(&id, move |p| {
            if let Some(title) = input.title {
                if title.trim().is_empty() {
                    return Err(CoreError::Validation("Proposal title must not be empty".into()));
                }
                p.title = title;
            }
            if let Some(client) = input.client {
                p.client = client;
            }
            if let Some(items) = input.items {
                p.items = items;
                p.recompute_total();
            }
            if let Some(status) = input.status {
                p.status = status;
            }
            if let Some(currency) = input.currency {
                p.currency = currency;
            }
            if input.locale.is_some() {
                p.locale = input.locale;
            }
            if input.issued_at.is_some() {
                p.issued_at = input.issued_at;
            }
            if input.valid_until.is_some() {
                p.valid_until = input.valid_until;
            }
            p.updated_at = now;
            Ok(())
        })
        .await?;
    Ok(Json(proposal))
}

/// DELETE /api/v1/proposals/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = EntityId::from(id.as_str());
    state.engine.delete::<Proposal>(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
