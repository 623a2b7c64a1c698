//! Message entity and repository trait.
//!
//! Maps to the `messages` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a message sent in a chat.
///
/// Maps to the `messages` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - content: TEXT NOT NULL
/// - sender_id: BIGINT NOT NULL REFERENCES users(id)
/// - chat_id: BIGINT NOT NULL REFERENCES chats(id)
/// - sent_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,

    pub content: String,

    /// Author user ID
    pub sender_id: i64,

    /// Chat the message was sent to
    pub chat_id: i64,

    pub sent_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Message {
    /// Check if this message has been edited since it was sent.
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.sent_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub content: String,
    pub sender_id: i64,
    pub chat_id: i64,
}

/// Repository trait for Message data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError>;

    /// List all messages ordered by id.
    async fn list(&self) -> Result<Vec<Message>, AppError>;

    /// List the messages of one chat ordered by id.
    async fn list_by_chat(&self, chat_id: i64) -> Result<Vec<Message>, AppError>;

    /// Insert a message. A missing sender or chat surfaces as
    /// `AppError::InvalidReference`.
    async fn create(&self, message: &NewMessage) -> Result<Message, AppError>;

    /// Replace the content. Returns `None` when the message does not exist.
    async fn update_content(&self, id: i64, content: &str) -> Result<Option<Message>, AppError>;

    /// Hard delete. Unknown ids are not an error.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
