//! Chat Service
//!
//! Chat CRUD and membership management.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Chat, ChatRepository, NewChat, User, UserRepository};
use crate::shared::error::AppError;

/// Chat service trait
#[async_trait]
pub trait ChatService: Send + Sync {
    async fn add_chat(&self, name: String) -> Result<Chat, ChatError>;

    async fn get_chat(&self, chat_id: i64) -> Result<Chat, ChatError>;

    async fn get_all_chats(&self) -> Result<Vec<Chat>, ChatError>;

    /// Rename a chat
    async fn update_chat(&self, chat_id: i64, name: String) -> Result<Chat, ChatError>;

    /// Delete a chat together with its memberships and messages
    async fn delete_chat(&self, chat_id: i64) -> Result<(), ChatError>;

    /// Add an active user to an existing chat
    async fn add_user_to_chat(&self, chat_id: i64, user_id: i64) -> Result<(), ChatError>;

    /// Active members of a chat
    async fn get_members(&self, chat_id: i64) -> Result<Vec<User>, ChatError>;
}

/// Chat service errors
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("no chat with this id")]
    NotFound,

    #[error("no such user with this id or chat with this id")]
    InvalidReference,

    #[error("{0}")]
    Store(String),
}

/// ChatService implementation
pub struct ChatServiceImpl<C, U>
where
    C: ChatRepository,
    U: UserRepository,
{
    chat_repo: Arc<C>,
    user_repo: Arc<U>,
}

impl<C, U> ChatServiceImpl<C, U>
where
    C: ChatRepository,
    U: UserRepository,
{
    pub fn new(chat_repo: Arc<C>, user_repo: Arc<U>) -> Self {
        Self { chat_repo, user_repo }
    }

    async fn chat_exists(&self, chat_id: i64) -> Result<bool, ChatError> {
        self.chat_repo
            .find_by_id(chat_id)
            .await
            .map(|chat| chat.is_some())
            .map_err(|e| ChatError::Store(format!("get chat by id = {}: {}", chat_id, e)))
    }
}

#[async_trait]
impl<C, U> ChatService for ChatServiceImpl<C, U>
where
    C: ChatRepository + 'static,
    U: UserRepository + 'static,
{
    async fn add_chat(&self, name: String) -> Result<Chat, ChatError> {
        let chat = self
            .chat_repo
            .create(&NewChat { name })
            .await
            .map_err(|e| ChatError::Store(format!("add chat: {}", e)))?;

        tracing::debug!(chat_id = chat.id, "chat added");
        Ok(chat)
    }

    async fn get_chat(&self, chat_id: i64) -> Result<Chat, ChatError> {
        self.chat_repo
            .find_by_id(chat_id)
            .await
            .map_err(|e| ChatError::Store(format!("get chat by id = {}: {}", chat_id, e)))?
            .ok_or(ChatError::NotFound)
    }

    async fn get_all_chats(&self) -> Result<Vec<Chat>, ChatError> {
        self.chat_repo
            .list()
            .await
            .map_err(|e| ChatError::Store(format!("get all chats: {}", e)))
    }

    async fn update_chat(&self, chat_id: i64, name: String) -> Result<Chat, ChatError> {
        self.chat_repo
            .update_name(chat_id, &name)
            .await
            .map_err(|e| ChatError::Store(format!("update chat {}: {}", chat_id, e)))?
            .ok_or(ChatError::NotFound)
    }

    async fn delete_chat(&self, chat_id: i64) -> Result<(), ChatError> {
        self.chat_repo
            .delete(chat_id)
            .await
            .map_err(|e| ChatError::Store(format!("delete chat with id = {}: {}", chat_id, e)))?;

        tracing::debug!(chat_id, "chat deleted with its members and messages");
        Ok(())
    }

    async fn add_user_to_chat(&self, chat_id: i64, user_id: i64) -> Result<(), ChatError> {
        let user = self
            .user_repo
            .find_active_by_id(user_id)
            .await
            .map_err(|e| ChatError::Store(format!("get user by id = {}: {}", user_id, e)))?;

        if user.is_none() || !self.chat_exists(chat_id).await? {
            tracing::info!(chat_id, user_id, "rejected membership with unknown user or chat");
            return Err(ChatError::InvalidReference);
        }

        self.chat_repo
            .add_member(chat_id, user_id)
            .await
            .map_err(|e| match e {
                AppError::InvalidReference(_) => ChatError::InvalidReference,
                e => ChatError::Store(format!("add user {} to chat {}: {}", user_id, chat_id, e)),
            })?;

        tracing::debug!(chat_id, user_id, "user added to chat");
        Ok(())
    }

    async fn get_members(&self, chat_id: i64) -> Result<Vec<User>, ChatError> {
        if !self.chat_exists(chat_id).await? {
            return Err(ChatError::NotFound);
        }

        self.chat_repo
            .list_members(chat_id)
            .await
            .map_err(|e| ChatError::Store(format!("get members of chat {}: {}", chat_id, e)))
    }
}
