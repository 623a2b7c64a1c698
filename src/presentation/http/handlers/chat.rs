//! Chat Handlers

use axum::{extract::State, Json};

use super::message::map_message_error;
use crate::application::dto::request::{AddMemberRequest, ChatNameRequest};
use crate::application::dto::response::{DeletedResponse, MembershipResponse, UserResponse};
use crate::application::services::ChatError;
use crate::domain::{Chat, Message};
use crate::presentation::http::extractors::{IdPath, ChatEntity, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn map_chat_error(err: ChatError) -> AppError {
    match err {
        ChatError::NotFound => AppError::NotFound(err.to_string()),
        ChatError::InvalidReference => AppError::InvalidReference(err.to_string()),
        ChatError::Store(msg) => AppError::Internal(msg),
    }
}

pub async fn add_chat(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ChatNameRequest>,
) -> Result<Json<Chat>, AppError> {
    let chat = state.chats.add_chat(body.name).await.map_err(map_chat_error)?;

    Ok(Json(chat))
}

pub async fn get_chat(
    State(state): State<AppState>,
    IdPath(chat_id, _): IdPath<ChatEntity>,
) -> Result<Json<Chat>, AppError> {
    let chat = state.chats.get_chat(chat_id).await.map_err(map_chat_error)?;

    Ok(Json(chat))
}

pub async fn get_all_chats(State(state): State<AppState>) -> Result<Json<Vec<Chat>>, AppError> {
    let chats = state.chats.get_all_chats().await.map_err(map_chat_error)?;

    Ok(Json(chats))
}

/// Rename a chat
pub async fn update_chat(
    State(state): State<AppState>,
    IdPath(chat_id, _): IdPath<ChatEntity>,
    ValidatedJson(body): ValidatedJson<ChatNameRequest>,
) -> Result<Json<Chat>, AppError> {
    let chat = state
        .chats
        .update_chat(chat_id, body.name)
        .await
        .map_err(map_chat_error)?;

    Ok(Json(chat))
}

/// Delete a chat with its memberships and messages
pub async fn delete_chat(
    State(state): State<AppState>,
    IdPath(chat_id, _): IdPath<ChatEntity>,
) -> Result<Json<DeletedResponse>, AppError> {
    state.chats.delete_chat(chat_id).await.map_err(map_chat_error)?;

    Ok(Json(DeletedResponse::default()))
}

/// Add a user to a chat
pub async fn add_member(
    State(state): State<AppState>,
    IdPath(chat_id, _): IdPath<ChatEntity>,
    ValidatedJson(body): ValidatedJson<AddMemberRequest>,
) -> Result<Json<MembershipResponse>, AppError> {
    state
        .chats
        .add_user_to_chat(chat_id, body.user_id)
        .await
        .map_err(map_chat_error)?;

    Ok(Json(MembershipResponse {
        chat_id,
        user_id: body.user_id,
    }))
}

/// List active members of a chat
pub async fn get_members(
    State(state): State<AppState>,
    IdPath(chat_id, _): IdPath<ChatEntity>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let members = state.chats.get_members(chat_id).await.map_err(map_chat_error)?;

    Ok(Json(members.into_iter().map(UserResponse::from).collect()))
}

/// List messages of a chat
pub async fn get_messages(
    State(state): State<AppState>,
    IdPath(chat_id, _): IdPath<ChatEntity>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = state
        .messages
        .get_chat_messages(chat_id)
        .await
        .map_err(map_message_error)?;

    Ok(Json(messages))
}
