//! User Service
//!
//! Registration, lookup, profile updates and soft deletion of users.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{NewUser, User, UserChanges, UserRepository};
use crate::shared::error::AppError;
use crate::shared::password::hash_password;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a user; the email must not belong to another active user
    async fn add_user(&self, request: CreateUserDto) -> Result<User, UserError>;

    /// Get an active user by ID
    async fn get_user(&self, user_id: i64) -> Result<User, UserError>;

    /// List all active users
    async fn get_all_users(&self) -> Result<Vec<User>, UserError>;

    /// Apply a partial update and return the refreshed user
    async fn update_user(&self, user_id: i64, update: UpdateUserDto) -> Result<User, UserError>;

    /// Soft delete a user and drop its chat memberships
    async fn delete_user(&self, user_id: i64) -> Result<(), UserError>;
}

/// Registration input; the password is hashed before it is stored.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub nickname: String,
    pub email: String,
    pub password: String,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("no user with this id")]
    NotFound,

    #[error("user with this email already registered")]
    DuplicateEmail,

    #[error("{0}")]
    Store(String),
}

/// UserService implementation
pub struct UserServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UserServiceImpl<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Best-effort early rejection; the unique index stays authoritative.
    async fn email_taken_by_other(&self, email: &str, user_id: Option<i64>) -> Result<bool, UserError> {
        let holder = self
            .user_repo
            .find_active_by_email(email)
            .await
            .map_err(|e| UserError::Store(format!("check email {:?}: {}", email, e)))?;

        Ok(matches!(holder, Some(other) if Some(other.id) != user_id))
    }
}

fn hash(password: &str) -> Result<String, UserError> {
    hash_password(password).map_err(|e| UserError::Store(format!("hash password: {}", e)))
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn add_user(&self, request: CreateUserDto) -> Result<User, UserError> {
        if self.email_taken_by_other(&request.email, None).await? {
            tracing::info!(email = %request.email, "rejected duplicate email");
            return Err(UserError::DuplicateEmail);
        }

        let new_user = NewUser {
            nickname: request.nickname,
            email: request.email,
            password_hash: hash(&request.password)?,
        };

        let user = self.user_repo.create(&new_user).await.map_err(|e| match e {
            AppError::Conflict(_) => UserError::DuplicateEmail,
            e => UserError::Store(format!("add user {:?}: {}", new_user.email, e)),
        })?;

        tracing::debug!(user_id = user.id, "user added");
        Ok(user)
    }

    async fn get_user(&self, user_id: i64) -> Result<User, UserError> {
        self.user_repo
            .find_active_by_id(user_id)
            .await
            .map_err(|e| UserError::Store(format!("get user by id = {}: {}", user_id, e)))?
            .ok_or(UserError::NotFound)
    }

    async fn get_all_users(&self) -> Result<Vec<User>, UserError> {
        self.user_repo
            .list_active()
            .await
            .map_err(|e| UserError::Store(format!("get all users: {}", e)))
    }

    async fn update_user(&self, user_id: i64, update: UpdateUserDto) -> Result<User, UserError> {
        if let Some(ref email) = update.email {
            if self.email_taken_by_other(email, Some(user_id)).await? {
                tracing::info!(user_id, email = %email, "rejected duplicate email");
                return Err(UserError::DuplicateEmail);
            }
        }

        let changes = UserChanges {
            nickname: update.nickname,
            email: update.email,
            password_hash: update.password.as_deref().map(hash).transpose()?,
        };

        if changes.is_empty() {
            return self.get_user(user_id).await;
        }

        let updated = self
            .user_repo
            .update(user_id, &changes)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => UserError::DuplicateEmail,
                e => UserError::Store(format!("update user {}: {}", user_id, e)),
            })?
            .ok_or(UserError::NotFound)?;

        tracing::debug!(user_id, "user updated");
        Ok(updated)
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), UserError> {
        self.user_repo
            .soft_delete(user_id, Utc::now())
            .await
            .map_err(|e| UserError::Store(format!("delete user with id = {}: {}", user_id, e)))?;

        tracing::debug!(user_id, "user soft deleted");
        Ok(())
    }
}
