//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Nickname written over a user's own on soft delete.
pub const DELETED_USER_NICKNAME: &str = "Deleted user";

/// Account lifecycle state.
///
/// Stored as the nullable `removed_at` column; everything above the
/// repository sees the tagged form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Deleted { removed_at: DateTime<Utc> },
}

impl AccountStatus {
    /// Build the status from the `removed_at` column.
    pub fn from_removed_at(removed_at: Option<DateTime<Utc>>) -> Self {
        match removed_at {
            Some(removed_at) => Self::Deleted { removed_at },
            None => Self::Active,
        }
    }

    /// Value for the `removed_at` column.
    pub fn removed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active => None,
            Self::Deleted { removed_at } => Some(*removed_at),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Represents a registered forum user.
///
/// Maps to the `users` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - nickname: VARCHAR(64) NOT NULL
/// - email: VARCHAR(255) NULL (unique among rows with removed_at IS NULL)
/// - password_hash: VARCHAR(255) NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - removed_at: TIMESTAMPTZ NULL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    pub nickname: String,

    /// Cleared when the account is soft deleted
    pub email: Option<String>,

    /// Argon2 password hash
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    #[serde(default)]
    pub status: AccountStatus,

    /// Registration timestamp
    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Fields required to insert a user. The password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub nickname: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial update of a user; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.nickname.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}

/// Repository trait for User data access operations.
///
/// Every lookup here sees active users only; soft-deleted rows are
/// retained for foreign keys but never returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an active user by id.
    async fn find_active_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find the active user holding an email address.
    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// List all active users ordered by id.
    async fn list_active(&self) -> Result<Vec<User>, AppError>;

    /// Insert a user. A taken email surfaces as `AppError::Conflict`.
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;

    /// Apply a partial update to an active user. Returns `None` when no
    /// active user has this id.
    async fn update(&self, id: i64, changes: &UserChanges) -> Result<Option<User>, AppError>;

    /// Scrub the user's identifying fields, mark it removed and drop its
    /// chat memberships. Unknown or already removed ids are not an error.
    async fn soft_delete(&self, id: i64, removed_at: DateTime<Utc>) -> Result<(), AppError>;
}
