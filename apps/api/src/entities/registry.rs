//! The closed registry of logical entity kinds and their backing tables.
//!
//! Every kind shares one row envelope: `id uuid`, `user_id uuid`, `data jsonb`,
//! `created_at`, `updated_at`. Table names are compile-time constants from this
//! enum, so dynamic SQL never interpolates user input.

/// A logical entity kind routable through `/api/v1/entities/:entity`.
///
/// Profiles are deliberately absent: they carry credentials and the tier
/// attribute, and are only reachable through the typed auth/profile routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Job,
    Application,
    Resume,
    Contact,
    Preferences,
    BulletPoint,
    Skill,
    CoverLetter,
    InterviewPrep,
    ApplicationEvent,
    AiInteraction,
    ResumeVersion,
    LearningResource,
    CareerGoal,
    JobOffer,
    PortfolioProject,
    JobAlert,
    Notification,
}

impl EntityKind {
    pub const ALL: [EntityKind; 18] = [
        EntityKind::Job,
        EntityKind::Application,
        EntityKind::Resume,
        EntityKind::Contact,
        EntityKind::Preferences,
        EntityKind::BulletPoint,
        EntityKind::Skill,
        EntityKind::CoverLetter,
        EntityKind::InterviewPrep,
        EntityKind::ApplicationEvent,
        EntityKind::AiInteraction,
        EntityKind::ResumeVersion,
        EntityKind::LearningResource,
        EntityKind::CareerGoal,
        EntityKind::JobOffer,
        EntityKind::PortfolioProject,
        EntityKind::JobAlert,
        EntityKind::Notification,
    ];

    /// Resolves a logical entity name from the request path.
    pub fn from_name(name: &str) -> Option<EntityKind> {
        Some(match name {
            "Job" => EntityKind::Job,
            "Application" => EntityKind::Application,
            "Resume" => EntityKind::Resume,
            "Contact" => EntityKind::Contact,
            "Preferences" => EntityKind::Preferences,
            "BulletPoint" => EntityKind::BulletPoint,
            "Skill" => EntityKind::Skill,
            "CoverLetter" => EntityKind::CoverLetter,
            "InterviewPrep" => EntityKind::InterviewPrep,
            "ApplicationEvent" => EntityKind::ApplicationEvent,
            "AIInteraction" => EntityKind::AiInteraction,
            "ResumeVersion" => EntityKind::ResumeVersion,
            "LearningResource" => EntityKind::LearningResource,
            "CareerGoal" => EntityKind::CareerGoal,
            "JobOffer" => EntityKind::JobOffer,
            "PortfolioProject" => EntityKind::PortfolioProject,
            "JobAlert" => EntityKind::JobAlert,
            "Notification" => EntityKind::Notification,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Job => "Job",
            EntityKind::Application => "Application",
            EntityKind::Resume => "Resume",
            EntityKind::Contact => "Contact",
            EntityKind::Preferences => "Preferences",
            EntityKind::BulletPoint => "BulletPoint",
            EntityKind::Skill => "Skill",
            EntityKind::CoverLetter => "CoverLetter",
            EntityKind::InterviewPrep => "InterviewPrep",
            EntityKind::AiInteraction => "AIInteraction",
            EntityKind::ApplicationEvent => "ApplicationEvent",
            EntityKind::ResumeVersion => "ResumeVersion",
            EntityKind::LearningResource => "LearningResource",
            EntityKind::CareerGoal => "CareerGoal",
            EntityKind::JobOffer => "JobOffer",
            EntityKind::PortfolioProject => "PortfolioProject",
            EntityKind::JobAlert => "JobAlert",
            EntityKind::Notification => "Notification",
        }
    }

    /// The backing Postgres table for this kind.
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Job => "jobs",
            EntityKind::Application => "applications",
            EntityKind::Resume => "resumes",
            EntityKind::Contact => "contacts",
            EntityKind::Preferences => "preferences",
            EntityKind::BulletPoint => "bullet_bank",
            EntityKind::Skill => "skills_library",
            EntityKind::CoverLetter => "cover_letters",
            EntityKind::InterviewPrep => "interview_prep",
            EntityKind::ApplicationEvent => "application_events",
            EntityKind::AiInteraction => "ai_interactions",
            EntityKind::ResumeVersion => "resume_versions",
            EntityKind::LearningResource => "learning_resources",
            EntityKind::CareerGoal => "career_goals",
            EntityKind::JobOffer => "job_offers",
            EntityKind::PortfolioProject => "portfolio_projects",
            EntityKind::JobAlert => "job_alerts",
            EntityKind::Notification => "notifications",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_registered_name() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn unknown_and_miscased_names_are_rejected() {
        assert_eq!(EntityKind::from_name("Widget"), None);
        assert_eq!(EntityKind::from_name("job"), None);
        assert_eq!(EntityKind::from_name("Profile"), None);
        assert_eq!(EntityKind::from_name(""), None);
    }

    #[test]
    fn table_names_are_unique() {
        let mut tables: Vec<&str> = EntityKind::ALL.iter().map(|k| k.table()).collect();
        tables.sort();
        tables.dedup();
        assert_eq!(tables.len(), EntityKind::ALL.len());
    }
}
