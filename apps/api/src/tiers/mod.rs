//! Subscription tiers: rank ordering, the per-tier feature matrix, and
//! row-count limit enforcement.
//!
//! Limits are checked by counting the owner's rows at request time. Unlimited
//! is the absence of a limit (`None`), not a sentinel value.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::registry::EntityKind;
use crate::entities::store;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Starter,
    Pro,
    Premium,
}

impl Tier {
    /// Parses a stored tier attribute. Unknown values read as `None`; callers
    /// fall back to `Starter`, the weakest tier.
    pub fn from_str(value: &str) -> Option<Tier> {
        match value {
            "starter" => Some(Tier::Starter),
            "pro" => Some(Tier::Pro),
            "premium" => Some(Tier::Premium),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Starter => "starter",
            Tier::Pro => "pro",
            Tier::Premium => "premium",
        }
    }

    /// Hierarchy position: starter(1) < pro(2) < premium(3).
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Starter => 1,
            Tier::Pro => 2,
            Tier::Premium => 3,
        }
    }

    /// Access checks compare ranks: a pro user passes a starter gate.
    pub fn has_access(&self, required: Tier) -> bool {
        self.rank() >= required.rank()
    }
}

/// The feature matrix entry for one tier. `None` limits mean unlimited.
#[derive(Debug, Clone, Serialize)]
pub struct TierFeatures {
    pub max_resumes: Option<i64>,
    pub max_jobs_saved: Option<i64>,
    pub max_applications: Option<i64>,
    pub ai_features: &'static [&'static str],
    pub ats_scoring: bool,
    pub advanced_search: bool,
    pub interview_prep: bool,
}

/// Returns the static feature matrix entry for a tier.
pub fn features(tier: Tier) -> &'static TierFeatures {
    match tier {
        Tier::Starter => &TierFeatures {
            max_resumes: Some(2),
            max_jobs_saved: Some(50),
            max_applications: Some(10),
            ai_features: &["basic_resume_review"],
            ats_scoring: false,
            advanced_search: false,
            interview_prep: false,
        },
        Tier::Pro => &TierFeatures {
            max_resumes: Some(10),
            max_jobs_saved: Some(200),
            max_applications: Some(50),
            ai_features: &[
                "basic_resume_review",
                "ats_optimization",
                "cover_letter_generation",
            ],
            ats_scoring: true,
            advanced_search: true,
            interview_prep: true,
        },
        Tier::Premium => &TierFeatures {
            max_resumes: None,
            max_jobs_saved: None,
            max_applications: None,
            ai_features: &[
                "basic_resume_review",
                "ats_optimization",
                "cover_letter_generation",
                "interview_prep",
                "job_matching",
                "skill_analysis",
            ],
            ats_scoring: true,
            advanced_search: true,
            interview_prep: true,
        },
    }
}

/// The limit (if any) a tier places on creating rows of the given kind.
pub fn limit_for(tier: Tier, kind: EntityKind) -> Option<i64> {
    let matrix = features(tier);
    match kind {
        EntityKind::Resume => matrix.max_resumes,
        EntityKind::Job => matrix.max_jobs_saved,
        EntityKind::Application => matrix.max_applications,
        _ => None,
    }
}

/// The minimum tier required to create rows of the given kind, if gated.
/// Interview prep is a pro feature in the matrix above.
pub fn required_tier(kind: EntityKind) -> Option<Tier> {
    match kind {
        EntityKind::InterviewPrep => Some(Tier::Pro),
        _ => None,
    }
}

/// Blocks creation of feature-gated kinds below their required tier.
pub fn enforce_access(tier: Tier, kind: EntityKind) -> Result<(), AppError> {
    let Some(required) = required_tier(kind) else {
        return Ok(());
    };
    if !tier.has_access(required) {
        return Err(AppError::Forbidden(format!(
            "Interview prep requires the {} plan. Upgrade to unlock it!",
            required.as_str()
        )));
    }
    Ok(())
}

/// The upgrade message shown when an owner is at their limit.
fn limit_message(kind: EntityKind, limit: i64) -> String {
    match kind {
        EntityKind::Resume => {
            format!("You've reached your resume limit ({limit}). Upgrade to create more!")
        }
        EntityKind::Job => {
            format!("You've reached your saved jobs limit ({limit}). Upgrade to save more!")
        }
        _ => {
            format!("You've reached your applications limit ({limit}). Upgrade to track more!")
        }
    }
}

/// Pluggable per-owner row counter. Carried in `AppState` as
/// `Arc<dyn UsageCounter>` so router tests can run without Postgres.
#[async_trait]
pub trait UsageCounter: Send + Sync {
    async fn count_owned(&self, user_id: Uuid, kind: EntityKind) -> Result<i64, AppError>;
}

/// Default counter backed by the entity tables.
pub struct PgUsageCounter {
    pub pool: PgPool,
}

#[async_trait]
impl UsageCounter for PgUsageCounter {
    async fn count_owned(&self, user_id: Uuid, kind: EntityKind) -> Result<i64, AppError> {
        Ok(store::count_owned(&self.pool, kind, user_id).await?)
    }
}

/// Blocks creation once the owner's row count has reached the tier limit.
pub async fn enforce_limit(
    usage: &dyn UsageCounter,
    tier: Tier,
    kind: EntityKind,
    user_id: Uuid,
) -> Result<(), AppError> {
    let Some(limit) = limit_for(tier, kind) else {
        return Ok(());
    };
    let count = usage.count_owned(user_id, kind).await?;
    if count >= limit {
        return Err(AppError::TierLimit(limit_message(kind, limit)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCounter(i64);

    #[async_trait]
    impl UsageCounter for FixedCounter {
        async fn count_owned(&self, _user_id: Uuid, _kind: EntityKind) -> Result<i64, AppError> {
            Ok(self.0)
        }
    }

    #[test]
    fn tier_ranks_are_ordered() {
        assert!(Tier::Starter.rank() < Tier::Pro.rank());
        assert!(Tier::Pro.rank() < Tier::Premium.rank());
        assert!(Tier::Premium.has_access(Tier::Starter));
        assert!(!Tier::Starter.has_access(Tier::Pro));
        assert!(Tier::Pro.has_access(Tier::Pro));
    }

    #[test]
    fn unknown_tier_string_parses_to_none() {
        assert_eq!(Tier::from_str("starter"), Some(Tier::Starter));
        assert_eq!(Tier::from_str("enterprise"), None);
        assert_eq!(Tier::from_str(""), None);
    }

    #[test]
    fn premium_limits_are_unlimited() {
        let matrix = features(Tier::Premium);
        assert_eq!(matrix.max_resumes, None);
        assert_eq!(matrix.max_jobs_saved, None);
        assert_eq!(matrix.max_applications, None);
        assert!(matrix.ai_features.contains(&"job_matching"));
    }

    #[test]
    fn uncounted_kinds_have_no_limit() {
        assert_eq!(limit_for(Tier::Starter, EntityKind::Contact), None);
        assert_eq!(limit_for(Tier::Starter, EntityKind::Resume), Some(2));
        assert_eq!(limit_for(Tier::Pro, EntityKind::Job), Some(200));
    }

    #[test]
    fn interview_prep_is_gated_at_pro() {
        let err = enforce_access(Tier::Starter, EntityKind::InterviewPrep).unwrap_err();
        match err {
            AppError::Forbidden(msg) => assert!(msg.contains("pro"), "message: {msg}"),
            other => panic!("expected Forbidden, got {other:?}"),
        }
        enforce_access(Tier::Pro, EntityKind::InterviewPrep).expect("pro passes the gate");
        enforce_access(Tier::Starter, EntityKind::Job).expect("ungated kinds pass");
    }

    #[tokio::test]
    async fn at_limit_owner_is_blocked() {
        let counter = FixedCounter(2);
        let err = enforce_limit(&counter, Tier::Starter, EntityKind::Resume, Uuid::new_v4())
            .await
            .unwrap_err();
        match err {
            AppError::TierLimit(msg) => {
                assert!(msg.contains("resume limit (2)"), "message: {msg}");
            }
            other => panic!("expected TierLimit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn under_limit_owner_passes() {
        let counter = FixedCounter(1);
        enforce_limit(&counter, Tier::Starter, EntityKind::Resume, Uuid::new_v4())
            .await
            .expect("one resume of two allowed");
    }

    #[tokio::test]
    async fn premium_owner_never_blocked() {
        let counter = FixedCounter(10_000);
        enforce_limit(&counter, Tier::Premium, EntityKind::Application, Uuid::new_v4())
            .await
            .expect("premium has no application limit");
    }
}
