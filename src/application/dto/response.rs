//! Response DTOs
//!
//! Data structures for API response bodies. Posts, messages and chats are
//! serialized as their entities; users go through `UserResponse` so the
//! password hash can never leak.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{AccountStatus, User};

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub nickname: String,
    pub email: Option<String>,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nickname: user.nickname,
            email: user.email,
            status: user.status,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Body returned by every delete endpoint
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

impl Default for DeletedResponse {
    fn default() -> Self {
        Self {
            message: "successfully deleted",
        }
    }
}

/// Body returned when a user joins a chat
#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub chat_id: i64,
    pub user_id: i64,
}
