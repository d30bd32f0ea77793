//! Handlers for the `/api/v1/auth` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::extract::AuthUser;
use crate::auth::jwt::{generate_access_token, generate_opaque_token, hash_opaque_token};
use crate::auth::password::{hash_password, validate_password, verify_password, DUMMY_HASH};
use crate::entities::validate::is_valid_email;
use crate::errors::{AppError, FieldErrors};
use crate::models::profile::{ProfileRepo, ProfileRow, ProfileView};
use crate::models::session::{PasswordResetRepo, SessionRepo};
use crate::state::AppState;

/// Reset tokens stay valid for one hour.
const RESET_TOKEN_TTL_MINS: i64 = 60;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /auth/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

/// Request body for `POST /auth/reset-password/confirm`.
#[derive(Debug, Deserialize)]
pub struct ResetConfirmRequest {
    pub token: String,
    pub password: String,
}

/// Successful authentication response returned by signup, login, and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub profile: ProfileView,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Creates an account at the starter tier and signs it in.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let email = input.email.trim().to_lowercase();

    let mut errors = validate_password(&input.password);
    if !is_valid_email(&email) {
        errors.insert("email".into(), "Invalid email format".into());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if ProfileRepo::find_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::Conflict(
            "An account with this email already exists".into(),
        ));
    }

    let password_hash =
        hash_password(&input.password).map_err(|e| anyhow::anyhow!("password hashing: {e}"))?;

    // The pre-check races with concurrent signups; the unique index decides.
    let profile = ProfileRepo::create(&state.db, &email, &password_hash, input.full_name.as_deref())
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("An account with this email already exists".into())
            }
            _ => AppError::Database(e),
        })?;

    tracing::info!("Created account {} ({})", profile.id, profile.email);
    let response = create_auth_response(&state, profile).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// One message for unknown email and wrong password alike.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = input.email.trim().to_lowercase();

    let profile = match ProfileRepo::find_by_email(&state.db, &email).await? {
        Some(profile) => profile,
        None => {
            // Burn a verification so unknown emails cost as much as bad
            // passwords and the miss paths are indistinguishable by timing.
            let _ = verify_password(&input.password, DUMMY_HASH);
            return Err(AppError::Unauthorized("Invalid email or password".into()));
        }
    };

    let password_valid = verify_password(&input.password, &profile.password_hash)
        .map_err(|e| anyhow::anyhow!("password verification: {e}"))?;
    if !password_valid {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    let response = create_auth_response(&state, profile).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchanges a valid refresh token for new tokens. The old session is revoked
/// first, so a replayed token finds its chain dead.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let token_hash = hash_opaque_token(&input.refresh_token);

    let session = SessionRepo::find_active_by_hash(&state.db, &token_hash)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired refresh token".into()))?;

    SessionRepo::revoke(&state.db, session.id).await?;

    let profile = ProfileRepo::find_by_id(&state.db, session.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))?;

    let response = create_auth_response(&state, profile).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<StatusCode, AppError> {
    let revoked = SessionRepo::revoke_all_for_user(&state.db, user.user_id).await?;
    tracing::debug!("Revoked {revoked} sessions for user {}", user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileView>, AppError> {
    let profile = ProfileRepo::find_by_id(&state.db, user.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))?;
    Ok(Json(profile.into()))
}

/// POST /api/v1/auth/reset-password
///
/// Always 204, so the endpoint does not reveal which emails have accounts.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetRequest>,
) -> Result<StatusCode, AppError> {
    let email = input.email.trim().to_lowercase();

    if let Some(profile) = ProfileRepo::find_by_email(&state.db, &email).await? {
        let (_token, token_hash) = generate_opaque_token();
        let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINS);
        PasswordResetRepo::create(&state.db, profile.id, &token_hash, expires_at).await?;
        tracing::info!("Issued password reset token for user {}", profile.id);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/reset-password/confirm
///
/// Consumes a single-use reset token, applies the new password, and revokes
/// every session of the account.
pub async fn reset_password_confirm(
    State(state): State<AppState>,
    Json(input): Json<ResetConfirmRequest>,
) -> Result<StatusCode, AppError> {
    let errors: FieldErrors = validate_password(&input.password);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let token_hash = hash_opaque_token(&input.token);
    let reset = PasswordResetRepo::find_active_by_hash(&state.db, &token_hash)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired reset token".into()))?;

    let password_hash =
        hash_password(&input.password).map_err(|e| anyhow::anyhow!("password hashing: {e}"))?;
    ProfileRepo::update_password(&state.db, reset.user_id, &password_hash).await?;
    PasswordResetRepo::mark_used(&state.db, reset.id).await?;
    SessionRepo::revoke_all_for_user(&state.db, reset.user_id).await?;

    tracing::info!("Password reset completed for user {}", reset.user_id);
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

/// Issues an access token and a fresh refresh-token session for a profile.
async fn create_auth_response(
    state: &AppState,
    profile: ProfileRow,
) -> Result<AuthResponse, AppError> {
    let access_token = generate_access_token(profile.id, &profile.tier, &state.config)
        .map_err(|e| anyhow::anyhow!("token generation: {e}"))?;

    let (refresh_token, refresh_hash) = generate_opaque_token();
    let expires_at = Utc::now() + Duration::days(state.config.refresh_token_expiry_days);
    SessionRepo::create(&state.db, profile.id, &refresh_hash, expires_at).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: state.config.access_token_expiry_mins * 60,
        profile: profile.into(),
    })
}
