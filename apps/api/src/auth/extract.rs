//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::jwt::validate_token;
use crate::errors::AppError;
use crate::state::AppState;
use crate::tiers::Tier;

/// Authenticated user extracted from `Authorization: Bearer <token>`.
///
/// The user id from the claims scopes every query a handler runs, so rows
/// belonging to other users are simply invisible.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    /// Tier at token issue time. Handlers that enforce limits re-read the
    /// profile, so a mid-session upgrade takes effect without re-login.
    pub tier: Tier,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".into())
        })?;

        let claims = validate_token(token, &state.config)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        Ok(AuthUser {
            user_id: claims.sub,
            tier: Tier::from_str(&claims.tier).unwrap_or(Tier::Starter),
        })
    }
}
