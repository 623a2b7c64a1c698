//! Post entity and repository trait.
//!
//! Maps to the `posts` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A forum post.
///
/// Maps to the `posts` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - content: TEXT NOT NULL
/// - author_id: BIGINT NOT NULL REFERENCES users(id)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub content: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub content: String,
    pub author_id: i64,
}

/// Repository trait for Post data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// List all posts ordered by id.
    async fn list(&self) -> Result<Vec<Post>, AppError>;

    /// Insert a post. A missing author surfaces as `AppError::InvalidReference`.
    async fn create(&self, post: &NewPost) -> Result<Post, AppError>;

    /// Replace the content. Returns `None` when the post does not exist.
    async fn update_content(&self, id: i64, content: &str) -> Result<Option<Post>, AppError>;

    /// Hard delete. Unknown ids are not an error.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
