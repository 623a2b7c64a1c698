//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Maps between the database schema and domain User entity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{
    AccountStatus, NewUser, User, UserChanges, UserRepository, DELETED_USER_NICKNAME,
};
use crate::shared::error::AppError;

/// Base query for every read. Soft-deleted rows are excluded here and only here.
const ACTIVE_USERS: &str = r#"
    SELECT id, nickname, email, password_hash, created_at, updated_at, removed_at
    FROM users
    WHERE removed_at IS NULL
"#;

/// Database row representation matching the users table schema.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    id: i64,
    nickname: String,
    email: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    removed_at: Option<DateTime<Utc>>,
}

impl UserRow {
    /// Convert database row to domain User entity.
    pub(crate) fn into_user(self) -> User {
        User {
            id: self.id,
            nickname: self.nickname,
            email: self.email,
            password_hash: self.password_hash,
            status: AccountStatus::from_removed_at(self.removed_at),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_active_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("{ACTIVE_USERS} AND id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("{ACTIVE_USERS} AND email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn list_active(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("{ACTIVE_USERS} ORDER BY id");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (nickname, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, nickname, email, password_hash, created_at, updated_at, removed_at
            "#,
        )
        .bind(&user.nickname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "user email"))?;

        Ok(row.into_user())
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET nickname = COALESCE($2, nickname),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
            WHERE id = $1 AND removed_at IS NULL
            RETURNING id, nickname, email, password_hash, created_at, updated_at, removed_at
            "#,
        )
        .bind(id)
        .bind(&changes.nickname)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "user email"))?;

        Ok(row.map(UserRow::into_user))
    }

    async fn soft_delete(&self, id: i64, removed_at: DateTime<Utc>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // Keeps the first removal time when called again.
        sqlx::query(
            r#"
            UPDATE users
            SET nickname = $2,
                email = NULL,
                removed_at = $3,
                updated_at = $3
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .bind(DELETED_USER_NICKNAME)
        .bind(removed_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM user_x_chat WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
