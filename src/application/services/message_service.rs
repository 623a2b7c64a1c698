//! Message Service
//!
//! Handles message operations including send, edit, delete. The sender must
//! be an active user and the chat must exist; membership is not required.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ChatRepository, Message, MessageRepository, NewMessage, UserRepository};
use crate::shared::error::AppError;

/// Message service trait
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Send a message to a chat
    async fn add_message(&self, request: CreateMessageDto) -> Result<Message, MessageError>;

    /// Get a single message
    async fn get_message(&self, message_id: i64) -> Result<Message, MessageError>;

    async fn get_all_messages(&self) -> Result<Vec<Message>, MessageError>;

    /// Messages of one chat, oldest first
    async fn get_chat_messages(&self, chat_id: i64) -> Result<Vec<Message>, MessageError>;

    /// Edit a message
    async fn update_message(&self, message_id: i64, content: String) -> Result<Message, MessageError>;

    /// Delete a message
    async fn delete_message(&self, message_id: i64) -> Result<(), MessageError>;
}

/// Create message request
#[derive(Debug, Clone)]
pub struct CreateMessageDto {
    pub content: String,
    pub sender_id: i64,
    pub chat_id: i64,
}

/// Message service errors
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("no message with this id")]
    NotFound,

    #[error("no chat with this id")]
    ChatNotFound,

    #[error("no such sender with this id or chat with this id")]
    InvalidReference,

    #[error("{0}")]
    Store(String),
}

/// MessageService implementation
pub struct MessageServiceImpl<M, U, C>
where
    M: MessageRepository,
    U: UserRepository,
    C: ChatRepository,
{
    message_repo: Arc<M>,
    user_repo: Arc<U>,
    chat_repo: Arc<C>,
}

impl<M, U, C> MessageServiceImpl<M, U, C>
where
    M: MessageRepository,
    U: UserRepository,
    C: ChatRepository,
{
    pub fn new(message_repo: Arc<M>, user_repo: Arc<U>, chat_repo: Arc<C>) -> Self {
        Self {
            message_repo,
            user_repo,
            chat_repo,
        }
    }

    async fn chat_exists(&self, chat_id: i64) -> Result<bool, MessageError> {
        self.chat_repo
            .find_by_id(chat_id)
            .await
            .map(|chat| chat.is_some())
            .map_err(|e| MessageError::Store(format!("get chat by id = {}: {}", chat_id, e)))
    }

    async fn sender_exists(&self, sender_id: i64) -> Result<bool, MessageError> {
        self.user_repo
            .find_active_by_id(sender_id)
            .await
            .map(|user| user.is_some())
            .map_err(|e| MessageError::Store(format!("get user by id = {}: {}", sender_id, e)))
    }
}

#[async_trait]
impl<M, U, C> MessageService for MessageServiceImpl<M, U, C>
where
    M: MessageRepository + 'static,
    U: UserRepository + 'static,
    C: ChatRepository + 'static,
{
    async fn add_message(&self, request: CreateMessageDto) -> Result<Message, MessageError> {
        if !self.sender_exists(request.sender_id).await? || !self.chat_exists(request.chat_id).await? {
            tracing::info!(
                sender_id = request.sender_id,
                chat_id = request.chat_id,
                "rejected message with unknown sender or chat"
            );
            return Err(MessageError::InvalidReference);
        }

        let new_message = NewMessage {
            content: request.content,
            sender_id: request.sender_id,
            chat_id: request.chat_id,
        };

        let message = self
            .message_repo
            .create(&new_message)
            .await
            .map_err(|e| match e {
                AppError::InvalidReference(_) => MessageError::InvalidReference,
                e => MessageError::Store(format!("add message {:?}: {}", new_message, e)),
            })?;

        tracing::debug!(message_id = message.id, chat_id = message.chat_id, "message added");
        Ok(message)
    }

    async fn get_message(&self, message_id: i64) -> Result<Message, MessageError> {
        self.message_repo
            .find_by_id(message_id)
            .await
            .map_err(|e| MessageError::Store(format!("get message by id = {}: {}", message_id, e)))?
            .ok_or(MessageError::NotFound)
    }

    async fn get_all_messages(&self) -> Result<Vec<Message>, MessageError> {
        self.message_repo
            .list()
            .await
            .map_err(|e| MessageError::Store(format!("get all messages: {}", e)))
    }

    async fn get_chat_messages(&self, chat_id: i64) -> Result<Vec<Message>, MessageError> {
        if !self.chat_exists(chat_id).await? {
            return Err(MessageError::ChatNotFound);
        }

        self.message_repo
            .list_by_chat(chat_id)
            .await
            .map_err(|e| MessageError::Store(format!("get messages of chat {}: {}", chat_id, e)))
    }

    async fn update_message(&self, message_id: i64, content: String) -> Result<Message, MessageError> {
        self.message_repo
            .update_content(message_id, &content)
            .await
            .map_err(|e| MessageError::Store(format!("update message {}: {}", message_id, e)))?
            .ok_or(MessageError::NotFound)
    }

    async fn delete_message(&self, message_id: i64) -> Result<(), MessageError> {
        self.message_repo
            .delete(message_id)
            .await
            .map_err(|e| MessageError::Store(format!("delete message with id = {}: {}", message_id, e)))
    }
}
