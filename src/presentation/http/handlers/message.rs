//! Message Handlers

use axum::{extract::State, Json};

use crate::application::dto::request::{CreateMessageRequest, UpdateMessageRequest};
use crate::application::dto::response::DeletedResponse;
use crate::application::services::MessageError;
use crate::domain::Message;
use crate::presentation::http::extractors::{IdPath, MessageEntity, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

pub(super) fn map_message_error(err: MessageError) -> AppError {
    match err {
        MessageError::NotFound | MessageError::ChatNotFound => AppError::NotFound(err.to_string()),
        MessageError::InvalidReference => AppError::InvalidReference(err.to_string()),
        MessageError::Store(msg) => AppError::Internal(msg),
    }
}

/// Send a message into a chat
pub async fn add_message(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateMessageRequest>,
) -> Result<Json<Message>, AppError> {
    let message = state
        .messages
        .add_message(body.into())
        .await
        .map_err(map_message_error)?;

    Ok(Json(message))
}

pub async fn get_message(
    State(state): State<AppState>,
    IdPath(message_id, _): IdPath<MessageEntity>,
) -> Result<Json<Message>, AppError> {
    let message = state
        .messages
        .get_message(message_id)
        .await
        .map_err(map_message_error)?;

    Ok(Json(message))
}

pub async fn get_all_messages(State(state): State<AppState>) -> Result<Json<Vec<Message>>, AppError> {
    let messages = state.messages.get_all_messages().await.map_err(map_message_error)?;

    Ok(Json(messages))
}

/// Edit a message
pub async fn update_message(
    State(state): State<AppState>,
    IdPath(message_id, _): IdPath<MessageEntity>,
    ValidatedJson(body): ValidatedJson<UpdateMessageRequest>,
) -> Result<Json<Message>, AppError> {
    let message = state
        .messages
        .update_message(message_id, body.content)
        .await
        .map_err(map_message_error)?;

    Ok(Json(message))
}

pub async fn delete_message(
    State(state): State<AppState>,
    IdPath(message_id, _): IdPath<MessageEntity>,
) -> Result<Json<DeletedResponse>, AppError> {
    state
        .messages
        .delete_message(message_id)
        .await
        .map_err(map_message_error)?;

    Ok(Json(DeletedResponse::default()))
}
