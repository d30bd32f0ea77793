//! The `profiles` table: account rows and their queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, full_name, avatar_url, tier, \
                       theme_preference, timezone, onboarding_completed, onboarding_step, \
                       created_at, updated_at";

/// One account row, credentials included. Never serialized to clients —
/// responses go through [`ProfileView`].
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub tier: String,
    pub theme_preference: String,
    pub timezone: String,
    pub onboarding_completed: bool,
    pub onboarding_step: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection of a profile, without the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub tier: String,
    pub theme_preference: String,
    pub timezone: String,
    pub onboarding_completed: bool,
    pub onboarding_step: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for ProfileView {
    fn from(row: ProfileRow) -> Self {
        ProfileView {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            avatar_url: row.avatar_url,
            tier: row.tier,
            theme_preference: row.theme_preference,
            timezone: row.timezone,
            onboarding_completed: row.onboarding_completed,
            onboarding_step: row.onboarding_step,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Mutable profile attributes applied by `PATCH /api/v1/profile`.
/// Tier and email are deliberately absent.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub theme_preference: String,
    pub timezone: String,
    pub onboarding_completed: bool,
    pub onboarding_step: i32,
}

/// Provides queries over the `profiles` table.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new account at the starter tier, returning the created row.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        full_name: Option<&str>,
    ) -> Result<ProfileRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (id, email, password_hash, full_name)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProfileRow>(&query)
            .bind(Uuid::new_v4())
            .bind(email)
            .bind(password_hash)
            .bind(full_name)
            .fetch_one(pool)
            .await
    }

    /// Emails are stored lowercase; callers normalize before lookup.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<ProfileRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE email = $1");
        sqlx::query_as::<_, ProfileRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ProfileRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, ProfileRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a profile update, bumping `updated_at`.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        changes: &ProfileUpdate,
    ) -> Result<ProfileRow, sqlx::Error> {
        let query = format!(
            "UPDATE profiles
             SET full_name = $1, avatar_url = $2, theme_preference = $3, timezone = $4,
                 onboarding_completed = $5, onboarding_step = $6, updated_at = NOW()
             WHERE id = $7
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProfileRow>(&query)
            .bind(&changes.full_name)
            .bind(&changes.avatar_url)
            .bind(&changes.theme_preference)
            .bind(&changes.timezone)
            .bind(changes.onboarding_completed)
            .bind(changes.onboarding_step)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn update_password(
        pool: &PgPool,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE profiles SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
