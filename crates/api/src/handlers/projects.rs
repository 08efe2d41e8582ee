//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::Deserialize;

use atelier_core::brand::page::BrandPage;
use atelier_core::brand::render::render_page;
use atelier_core::bulk::{BulkSyncReport, ExternalProject};
use atelier_core::project::{ContentBlock, Project};
use atelier_core::{CoreError, EntityId};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub title: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default)]
    pub account_id: Option<EntityId>,
    #[serde(default)]
    pub proposal_id: Option<EntityId>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProject {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub account_id: Option<EntityId>,
    #[serde(default)]
    pub proposal_id: Option<EntityId>,
    /// Replaces the embedded brand configuration when present.
    #[serde(default)]
    pub brand: Option<BrandPage>,
    /// Replaces the content-block list when present.
    #[serde(default)]
    pub blocks: Option<Vec<ContentBlock>>,
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if input.title.trim().is_empty() {
        return Err(CoreError::Validation("Project title must not be empty".into()).into());
    }
    let now = chrono::Utc::now();
    let mut project = Project::new(EntityId::from("0"), input.title, now);
    if let Some(client) = input.client {
        project.client = client;
    }
    if let Some(category) = input.category {
        project.category = category;
    }
    if let Some(status) = input.status.as_deref() {
        project.set_status(status)?;
    }
    if let Some(progress) = input.progress {
        project.set_progress(progress);
    }
    project.account_id = input.account_id;
    project.proposal_id = input.proposal_id;

    let project = state.engine.create(project).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> Json<Vec<Project>> {
    let projects: Vec<Project> = state.engine.store().list();
    Json(projects)
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Project>> {
    let id = EntityId::from(id.as_str());
    let project = state
        .engine
        .store()
        .get::<Project>(&id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "projects",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let id = EntityId::from(id.as_str());
    let now = chrono::Utc::now();
    let project = state
        .engine
        .update::<Project>(&id, move |p| {
            if let Some(title) = input.title {
                if title.trim().is_empty() {
                    return Err(CoreError::Validation("Project title must not be empty".into()));
                }
                p.title = title;
            }
            if let Some(client) = input.client {
                p.client = client;
            }
            if let Some(category) = input.category {
                p.category = category;
            }
            if let Some(status) = input.status.as_deref() {
                p.set_status(status)?;
            }
            if let Some(progress) = input.progress {
                p.set_progress(progress);
            }
            if let Some(published) = input.published {
                p.published = published;
            }
            if input.account_id.is_some() {
                p.account_id = input.account_id;
            }
            if input.proposal_id.is_some() {
                p.proposal_id = input.proposal_id;
            }
            if input.brand.is_some() {
                p.brand = input.brand;
            }
            if let Some(blocks) = input.blocks {
                p.blocks = blocks;
            }
            p.updated_at = now;
            Ok(())
        })
        .await?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = EntityId::from(id.as_str());
    state.engine.delete::<Project>(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/projects/sync
pub async fn bulk_sync(
    State(state): State<AppState>,
    Json(incoming): Json<Vec<ExternalProject>>,
) -> AppResult<Json<DataResponse<BulkSyncReport>>> {
    let report = state.engine.bulk_sync_projects(incoming)?;
    Ok(Json(DataResponse { data: report }))
}

#[derive(Debug, Deserialize)]
pub struct BrandPageQuery {
    /// Render an unpublished page (admin preview).
    #[serde(default)]
    pub preview: bool,
}

/// GET /api/v1/projects/{id}/brand-page
///
/// Renders the project's embedded brand configuration to a standalone HTML
/// document. Unpublished pages 404 unless `?preview=true`.
pub async fn brand_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<BrandPageQuery>,
) -> AppResult<Html<String>> {
    let id = EntityId::from(id.as_str());
    let project = state
        .engine
        .store()
        .get::<Project>(&id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "projects",
            id: id.clone(),
        }))?;

    if !project.published && !query.preview {
        return Err(CoreError::NotFound {
            entity: "brand page",
            id,
        }
        .into());
    }
    let brand = project.brand.ok_or(CoreError::NotFound {
        entity: "brand page",
        id,
    })?;

    Ok(Html(render_page(&brand)))
}
