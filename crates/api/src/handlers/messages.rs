//! Handlers for the `/messages` inbox resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use atelier_core::message::Message;
use atelier_core::{CoreError, EntityId};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateMessage {
    pub sender: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMessage {
    /// The only admin-editable message field is the read flag.
    #[serde(default)]
    pub read: Option<bool>,
}

/// POST /api/v1/messages
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMessage>,
) -> AppResult<(StatusCode, Json<Message>)> {
    if input.sender.trim().is_empty() {
        return Err(CoreError::Validation("Message sender must not be empty".into()).into());
    }
    let message = Message {
        id: EntityId::from("0"),
        sender: input.sender,
        subject: input.subject.unwrap_or_default(),
        body: input.body.unwrap_or_default(),
        read: false,
        sent_at: chrono::Utc::now(),
    };
    let message = state.engine.create(message).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/v1/messages
pub async fn list(State(state): State<AppState>) -> Json<Vec<Message>> {
    let messages: Vec<Message> = state.engine.store().list();
    Json(messages)
}

/// GET /api/v1/messages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Message>> {
    let id = EntityId::from(id.as_str());
    let message = state
        .engine
        .store()
        .get::<Message>(&id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "messages",
            id,
        }))?;
    Ok(Json(message))
}

/// PUT /api/v1/messages/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateMessage>,
) -> AppResult<Json<Message>> {
    let id = EntityId::from(id.as_str());
    let message = state
        .engine
        .update::<Message>(&id, move |m| {
            if let Some(read) = input.read {
                m.read = read;
            }
            Ok(())
        })
        .await?;
    Ok(Json(message))
}

/// DELETE /api/v1/messages/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = EntityId::from(id.as_str());
    state.engine.delete::<Message>(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
