//! Refresh-token sessions and single-use password-reset tokens.
//!
//! Both tables store SHA-256 digests of opaque tokens, never the plaintext.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub refresh_token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

/// Provides queries over the `sessions` table.
pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<SessionRow, sqlx::Error> {
        sqlx::query_as::<_, SessionRow>(
            "INSERT INTO sessions (id, user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, refresh_token_hash, expires_at, revoked, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(refresh_token_hash)
        .bind(expires_at)
        .fetch_one(pool)
        .await
    }

    /// Finds a session by token hash, skipping revoked and expired rows.
    pub async fn find_active_by_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<SessionRow>, sqlx::Error> {
        sqlx::query_as::<_, SessionRow>(
            "SELECT id, user_id, refresh_token_hash, expires_at, revoked, created_at
             FROM sessions
             WHERE refresh_token_hash = $1 AND revoked = false AND expires_at > NOW()",
        )
        .bind(hash)
        .fetch_optional(pool)
        .await
    }

    /// Revoke one session (token rotation). Returns `true` if a row changed.
    pub async fn revoke(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE sessions SET revoked = true WHERE id = $1 AND revoked = false")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every active session for a user (logout, password change).
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked = true WHERE user_id = $1 AND revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

/// Provides queries over the `password_resets` table.
pub struct PasswordResetRepo;

impl PasswordResetRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetRow, sqlx::Error> {
        sqlx::query_as::<_, PasswordResetRow>(
            "INSERT INTO password_resets (id, user_id, token_hash, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, token_hash, expires_at, used, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(pool)
        .await
    }

    /// Finds a reset token that is neither used nor expired.
    pub async fn find_active_by_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<PasswordResetRow>, sqlx::Error> {
        sqlx::query_as::<_, PasswordResetRow>(
            "SELECT id, user_id, token_hash, expires_at, used, created_at
             FROM password_resets
             WHERE token_hash = $1 AND used = false AND expires_at > NOW()",
        )
        .bind(hash)
        .fetch_optional(pool)
        .await
    }

    /// Marks a reset token as consumed. Single-use: a second confirm fails.
    pub async fn mark_used(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE password_resets SET used = true WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
