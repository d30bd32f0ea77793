//! Dashboard quick stats, computed by counting at request time.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::auth::extract::AuthUser;
use crate::entities::registry::EntityKind;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub jobs: i64,
    pub applications: i64,
    pub resumes: i64,
    pub contacts: i64,
    /// Application counts keyed by status; rows without a status land under
    /// `unknown`.
    pub application_status: BTreeMap<String, i64>,
}

/// GET /api/v1/dashboard/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DashboardStats>, AppError> {
    let jobs = state.usage.count_owned(user.user_id, EntityKind::Job).await?;
    let applications = state
        .usage
        .count_owned(user.user_id, EntityKind::Application)
        .await?;
    let resumes = state.usage.count_owned(user.user_id, EntityKind::Resume).await?;
    let contacts = state
        .usage
        .count_owned(user.user_id, EntityKind::Contact)
        .await?;

    let breakdown: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT COALESCE(data->>'status', 'unknown') AS status, COUNT(*)
        FROM applications
        WHERE user_id = $1
        GROUP BY 1
        "#,
    )
    .bind(user.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(DashboardStats {
        jobs,
        applications,
        resumes,
        contacts,
        application_status: breakdown.into_iter().collect(),
    }))
}
