//! Request DTOs
//!
//! Data structures for API request bodies. Field rules are enforced by
//! `validator` before anything reaches a service.

use serde::Deserialize;
use validator::Validate;

use crate::application::services::{CreateMessageDto, CreatePostDto, CreateUserDto, UpdateUserDto};

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Nickname must be 1-64 characters"))]
    pub nickname: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

impl From<CreateUserRequest> for CreateUserDto {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            nickname: request.nickname,
            email: request.email,
            password: request.password,
        }
    }
}

/// Update user request; omitted fields are left as they are
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Nickname must be 1-64 characters"))]
    pub nickname: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUserDto {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            nickname: request.nickname,
            email: request.email,
            password: request.password,
        }
    }
}

/// Create post request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,

    #[validate(range(min = 1, message = "Author id must be positive"))]
    pub author_id: i64,
}

impl From<CreatePostRequest> for CreatePostDto {
    fn from(request: CreatePostRequest) -> Self {
        Self {
            content: request.content,
            author_id: request.author_id,
        }
    }
}

/// Update post request; only the content can change
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,
}

/// Send message request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Content must be 1-4000 characters"))]
    pub content: String,

    #[validate(range(min = 1, message = "Sender id must be positive"))]
    pub sender_id: i64,

    #[validate(range(min = 1, message = "Chat id must be positive"))]
    pub chat_id: i64,
}

/// Edit message request, held to the same limit as sending
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Content must be 1-4000 characters"))]
    pub content: String,
}

impl From<CreateMessageRequest> for CreateMessageDto {
    fn from(request: CreateMessageRequest) -> Self {
        Self {
            content: request.content,
            sender_id: request.sender_id,
            chat_id: request.chat_id,
        }
    }
}

/// Create or rename chat request
#[derive(Debug, Deserialize, Validate)]
pub struct ChatNameRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Add member request
#[derive(Debug, Deserialize, Validate)]
pub struct AddMemberRequest {
    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: i64,
}
