//! Post Service
//!
//! Handles post operations; an author must be an active user.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostRepository, UserRepository};
use crate::shared::error::AppError;

/// Post service trait
#[async_trait]
pub trait PostService: Send + Sync {
    async fn add_post(&self, request: CreatePostDto) -> Result<Post, PostError>;

    async fn get_post(&self, post_id: i64) -> Result<Post, PostError>;

    async fn get_all_posts(&self) -> Result<Vec<Post>, PostError>;

    /// Replace a post's content
    async fn update_post(&self, post_id: i64, content: String) -> Result<Post, PostError>;

    async fn delete_post(&self, post_id: i64) -> Result<(), PostError>;
}

/// Create post request
#[derive(Debug, Clone)]
pub struct CreatePostDto {
    pub content: String,
    pub author_id: i64,
}

/// Post service errors
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("no post with this id")]
    NotFound,

    #[error("no such author with this id")]
    InvalidAuthor,

    #[error("{0}")]
    Store(String),
}

/// PostService implementation
pub struct PostServiceImpl<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    post_repo: Arc<P>,
    user_repo: Arc<U>,
}

impl<P, U> PostServiceImpl<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    pub fn new(post_repo: Arc<P>, user_repo: Arc<U>) -> Self {
        Self { post_repo, user_repo }
    }
}

#[async_trait]
impl<P, U> PostService for PostServiceImpl<P, U>
where
    P: PostRepository + 'static,
    U: UserRepository + 'static,
{
    async fn add_post(&self, request: CreatePostDto) -> Result<Post, PostError> {
        let author = self
            .user_repo
            .find_active_by_id(request.author_id)
            .await
            .map_err(|e| PostError::Store(format!("get user by id = {}: {}", request.author_id, e)))?;

        if author.is_none() {
            tracing::info!(author_id = request.author_id, "rejected post with unknown author");
            return Err(PostError::InvalidAuthor);
        }

        let new_post = NewPost {
            content: request.content,
            author_id: request.author_id,
        };

        let post = self.post_repo.create(&new_post).await.map_err(|e| match e {
            AppError::InvalidReference(_) => PostError::InvalidAuthor,
            e => PostError::Store(format!("add post {:?}: {}", new_post, e)),
        })?;

        tracing::debug!(post_id = post.id, author_id = post.author_id, "post added");
        Ok(post)
    }

    async fn get_post(&self, post_id: i64) -> Result<Post, PostError> {
        self.post_repo
            .find_by_id(post_id)
            .await
            .map_err(|e| PostError::Store(format!("get post by id = {}: {}", post_id, e)))?
            .ok_or(PostError::NotFound)
    }

    async fn get_all_posts(&self) -> Result<Vec<Post>, PostError> {
        self.post_repo
            .list()
            .await
            .map_err(|e| PostError::Store(format!("get all posts: {}", e)))
    }

    async fn update_post(&self, post_id: i64, content: String) -> Result<Post, PostError> {
        self.post_repo
            .update_content(post_id, &content)
            .await
            .map_err(|e| PostError::Store(format!("update post {}: {}", post_id, e)))?
            .ok_or(PostError::NotFound)
    }

    async fn delete_post(&self, post_id: i64) -> Result<(), PostError> {
        self.post_repo
            .delete(post_id)
            .await
            .map_err(|e| PostError::Store(format!("delete post with id = {}: {}", post_id, e)))
    }
}
