//! Account endpoints: profile updates and the tier feature report.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use crate::auth::extract::AuthUser;
use crate::entities::registry::EntityKind;
use crate::errors::{AppError, FieldErrors};
use crate::models::profile::{ProfileRepo, ProfileRow, ProfileUpdate, ProfileView};
use crate::state::AppState;
use crate::themes::assets::ThemeName;
use crate::tiers::{self, Tier};

/// Distinguishes an absent field from an explicit `null`: absent deserializes
/// to `None`, `null` to `Some(None)`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Request body for `PATCH /api/v1/profile`. Absent fields keep their current
/// values; the nullable columns accept an explicit `null` to clear. Tier and
/// email are not updatable here.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
    pub theme_preference: Option<String>,
    pub timezone: Option<String>,
    pub onboarding_completed: Option<bool>,
    pub onboarding_step: Option<i32>,
}

const MAX_ONBOARDING_STEP: i32 = 10;

fn validate_update(input: &UpdateProfileRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Some(theme) = &input.theme_preference {
        if ThemeName::from_str(theme).is_none() {
            let names: Vec<&str> = ThemeName::ALL.iter().map(|t| t.as_str()).collect();
            errors.insert(
                "theme_preference".into(),
                format!("Theme must be one of: {}", names.join(", ")),
            );
        }
    }
    if let Some(step) = input.onboarding_step {
        if !(0..=MAX_ONBOARDING_STEP).contains(&step) {
            errors.insert(
                "onboarding_step".into(),
                format!("Onboarding step must be between 0 and {MAX_ONBOARDING_STEP}"),
            );
        }
    }

    errors
}

fn apply_update(existing: &ProfileRow, input: UpdateProfileRequest) -> ProfileUpdate {
    ProfileUpdate {
        full_name: match input.full_name {
            None => existing.full_name.clone(),
            Some(value) => value,
        },
        avatar_url: match input.avatar_url {
            None => existing.avatar_url.clone(),
            Some(value) => value,
        },
        theme_preference: input
            .theme_preference
            .unwrap_or_else(|| existing.theme_preference.clone()),
        timezone: input.timezone.unwrap_or_else(|| existing.timezone.clone()),
        onboarding_completed: input
            .onboarding_completed
            .unwrap_or(existing.onboarding_completed),
        onboarding_step: input.onboarding_step.unwrap_or(existing.onboarding_step),
    }
}

/// PATCH /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileView>, AppError> {
    let errors = validate_update(&input);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let existing = ProfileRepo::find_by_id(&state.db, user.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))?;

    let changes = apply_update(&existing, input);
    let updated = ProfileRepo::update(&state.db, user.user_id, &changes).await?;
    Ok(Json(updated.into()))
}

/// GET /api/v1/account/features
///
/// The tier, its feature matrix entry, and current usage against the counted
/// limits — usage is counted live at request time.
pub async fn account_features(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let profile = ProfileRepo::find_by_id(&state.db, user.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))?;
    let tier = Tier::from_str(&profile.tier).unwrap_or(Tier::Starter);
    let matrix = tiers::features(tier);

    let resumes = state.usage.count_owned(user.user_id, EntityKind::Resume).await?;
    let jobs = state.usage.count_owned(user.user_id, EntityKind::Job).await?;
    let applications = state
        .usage
        .count_owned(user.user_id, EntityKind::Application)
        .await?;

    Ok(Json(json!({
        "tier": tier.as_str(),
        "features": matrix,
        "usage": {
            "resumes": { "used": resumes, "limit": matrix.max_resumes },
            "saved_jobs": { "used": jobs, "limit": matrix.max_jobs_saved },
            "applications": { "used": applications, "limit": matrix.max_applications },
        },
    })))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn empty_update() -> UpdateProfileRequest {
        UpdateProfileRequest {
            full_name: None,
            avatar_url: None,
            theme_preference: None,
            timezone: None,
            onboarding_completed: None,
            onboarding_step: None,
        }
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let input = UpdateProfileRequest {
            theme_preference: Some("Neon".into()),
            ..empty_update()
        };
        let errors = validate_update(&input);
        assert!(errors
            .get("theme_preference")
            .expect("theme error present")
            .contains("DeepWater"));
    }

    #[test]
    fn registry_theme_passes() {
        let input = UpdateProfileRequest {
            theme_preference: Some("Steel".into()),
            onboarding_step: Some(10),
            ..empty_update()
        };
        assert!(validate_update(&input).is_empty());
    }

    fn sample_row() -> ProfileRow {
        let now = chrono::Utc::now();
        ProfileRow {
            id: uuid::Uuid::new_v4(),
            email: "jo@acme.example".into(),
            password_hash: "$argon2id$unused".into(),
            full_name: Some("Jo Doe".into()),
            avatar_url: Some("https://cdn.example/jo.png".into()),
            tier: "starter".into(),
            theme_preference: "Welcome".into(),
            timezone: "UTC".into(),
            onboarding_completed: false,
            onboarding_step: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn explicit_null_clears_avatar_but_absent_keeps_it() {
        let existing = sample_row();

        let input: UpdateProfileRequest =
            serde_json::from_value(json!({"avatar_url": null})).unwrap();
        let changes = apply_update(&existing, input);
        assert_eq!(changes.avatar_url, None);
        assert_eq!(changes.full_name, existing.full_name);

        let input: UpdateProfileRequest =
            serde_json::from_value(json!({"timezone": "Europe/Berlin"})).unwrap();
        let changes = apply_update(&existing, input);
        assert_eq!(changes.avatar_url, existing.avatar_url);
        assert_eq!(changes.timezone, "Europe/Berlin");
    }

    #[test]
    fn provided_name_replaces_the_old_one() {
        let existing = sample_row();
        let input: UpdateProfileRequest =
            serde_json::from_value(json!({"full_name": "Jo Q. Doe"})).unwrap();
        let changes = apply_update(&existing, input);
        assert_eq!(changes.full_name.as_deref(), Some("Jo Q. Doe"));
    }

    #[test]
    fn onboarding_step_bounds() {
        let input = UpdateProfileRequest {
            onboarding_step: Some(11),
            ..empty_update()
        };
        let errors = validate_update(&input);
        assert!(errors.contains_key("onboarding_step"));

        let input = UpdateProfileRequest {
            onboarding_step: Some(-1),
            ..empty_update()
        };
        assert!(validate_update(&input).contains_key("onboarding_step"));
    }
}
