//! User Handlers

use axum::{extract::State, Json};

use crate::application::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::application::dto::response::{DeletedResponse, UserResponse};
use crate::application::services::UserError;
use crate::presentation::http::extractors::{IdPath, UserEntity, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn map_user_error(err: UserError) -> AppError {
    match err {
        UserError::NotFound => AppError::NotFound(err.to_string()),
        UserError::DuplicateEmail => AppError::Conflict(err.to_string()),
        UserError::Store(msg) => AppError::Internal(msg),
    }
}

/// Register a new user
pub async fn add_user(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.users.add_user(body.into()).await.map_err(map_user_error)?;

    Ok(Json(user.into()))
}

/// Get an active user by ID
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(user_id, _): IdPath<UserEntity>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.users.get_user(user_id).await.map_err(map_user_error)?;

    Ok(Json(user.into()))
}

/// List active users
pub async fn get_all_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.users.get_all_users().await.map_err(map_user_error)?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Update nickname, email or password
pub async fn update_user(
    State(state): State<AppState>,
    IdPath(user_id, _): IdPath<UserEntity>,
    ValidatedJson(body): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .users
        .update_user(user_id, body.into())
        .await
        .map_err(map_user_error)?;

    Ok(Json(user.into()))
}

/// Soft delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    IdPath(user_id, _): IdPath<UserEntity>,
) -> Result<Json<DeletedResponse>, AppError> {
    state.users.delete_user(user_id).await.map_err(map_user_error)?;

    Ok(Json(DeletedResponse::default()))
}
