//! Post Handlers

use axum::{extract::State, Json};

use crate::application::dto::request::{CreatePostRequest, UpdatePostRequest};
use crate::application::dto::response::DeletedResponse;
use crate::application::services::PostError;
use crate::domain::Post;
use crate::presentation::http::extractors::{IdPath, PostEntity, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn map_post_error(err: PostError) -> AppError {
    match err {
        PostError::NotFound => AppError::NotFound(err.to_string()),
        PostError::InvalidAuthor => AppError::InvalidReference(err.to_string()),
        PostError::Store(msg) => AppError::Internal(msg),
    }
}

pub async fn add_post(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreatePostRequest>,
) -> Result<Json<Post>, AppError> {
    let post = state.posts.add_post(body.into()).await.map_err(map_post_error)?;

    Ok(Json(post))
}

pub async fn get_post(
    State(state): State<AppState>,
    IdPath(post_id, _): IdPath<PostEntity>,
) -> Result<Json<Post>, AppError> {
    let post = state.posts.get_post(post_id).await.map_err(map_post_error)?;

    Ok(Json(post))
}

pub async fn get_all_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let posts = state.posts.get_all_posts().await.map_err(map_post_error)?;

    Ok(Json(posts))
}

/// Replace a post's content
pub async fn update_post(
    State(state): State<AppState>,
    IdPath(post_id, _): IdPath<PostEntity>,
    ValidatedJson(body): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<Post>, AppError> {
    let post = state
        .posts
        .update_post(post_id, body.content)
        .await
        .map_err(map_post_error)?;

    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    IdPath(post_id, _): IdPath<PostEntity>,
) -> Result<Json<DeletedResponse>, AppError> {
    state.posts.delete_post(post_id).await.map_err(map_post_error)?;

    Ok(Json(DeletedResponse::default()))
}
