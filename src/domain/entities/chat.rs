//! Chat entity and repository trait.
//!
//! Maps to the `chats` table plus the `user_x_chat` membership table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;
use crate::shared::error::AppError;

/// A named conversation with members and messages.
///
/// Maps to the `chats` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(100) NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// Membership lives in `user_x_chat (user_id, chat_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChat {
    pub name: String,
}

/// Repository trait for Chat data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Chat>, AppError>;

    /// List all chats ordered by id.
    async fn list(&self) -> Result<Vec<Chat>, AppError>;

    async fn create(&self, chat: &NewChat) -> Result<Chat, AppError>;

    /// Rename a chat. Returns `None` when the chat does not exist.
    async fn update_name(&self, id: i64, name: &str) -> Result<Option<Chat>, AppError>;

    /// Delete the chat's memberships, then its messages, then the chat row,
    /// atomically. Unknown ids are not an error.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Add a membership row. Adding an existing member is a no-op; a
    /// missing user or chat surfaces as `AppError::InvalidReference`.
    async fn add_member(&self, chat_id: i64, user_id: i64) -> Result<(), AppError>;

    /// Active members of a chat ordered by user id.
    async fn list_members(&self, chat_id: i64) -> Result<Vec<User>, AppError>;
}
