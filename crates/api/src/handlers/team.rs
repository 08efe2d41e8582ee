//! Handlers for the `/team` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use atelier_core::team::{Availability, TeamMember};
use atelier_core::{CoreError, EntityId};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTeamMember {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub availability: Option<Availability>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTeamMember {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub availability: Option<Availability>,
}

/// POST /api/v1/team
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTeamMember>,
) -> AppResult<(StatusCode, Json<TeamMember>)> {
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("Team member name must not be empty".into()).into());
    }
    let member = TeamMember {
        id: EntityId::from("0"),
        name: input.name,
        role: input.role.unwrap_or_default(),
        availability: input.availability.unwrap_or_default(),
    };
    let member = state.engine.create(member).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// GET /api/v1/team
pub async fn list(State(state): State<AppState>) -> Json<Vec<TeamMember>> {
    let members: Vec<TeamMember> = state.engine.store().list();
    Json(members)
}

/// GET /api/v1/team/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TeamMember>> {
    let id = EntityId::from(id.as_str());
    let member = state
        .engine
        .store()
        .get::<TeamMember>(&id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "team", id }))?;
    Ok(Json(member))
}

/// PUT /api/v1/team/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTeamMember>,
) -> AppResult<Json<TeamMember>> {
    let id = EntityId::from(id.as_str());
    let member = state
        .engine
        .update::<TeamMember>(&id, move |m| {
            if let Some(name) = input.name {
                if name.trim().is_empty() {
                    return Err(CoreError::Validation(
                        "Team member name must not be empty".into(),
                    ));
                }
                m.name = name;
            }
            if let Some(role) = input.role {
                m.role = role;
            }
            if let Some(availability) = input.availability {
                m.availability = availability;
            }
            Ok(())
        })
        .await?;
    Ok(Json(member))
}

/// DELETE /api/v1/team/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = EntityId::from(id.as_str());
    state.engine.delete::<TeamMember>(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
