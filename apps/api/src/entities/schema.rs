//! Static per-kind validation schemas.
//!
//! Each kind declares its required fields plus type/format/enum/range rules
//! for optional ones. Unknown fields are accepted and stored verbatim — the
//! payloads are free-form documents, the schema only pins down the fields the
//! application itself branches on.

use crate::entities::registry::EntityKind;

/// A single typed rule applied to an optional field when it is present.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Value must be a string from the given set.
    Enum(&'static [&'static str]),
    /// Value must be a number within the inclusive range.
    Range { min: f64, max: f64 },
    /// Value must be a string with a length in the inclusive range.
    Length { min: usize, max: usize },
    Email,
    Url,
    /// RFC 3339 date-time or a plain `YYYY-MM-DD` date.
    DateTime,
    Boolean,
    Number,
    Text,
    /// Array of strings.
    TextArray,
}

/// A field name paired with the rule it must satisfy.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
}

/// The validation schema for one entity kind.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    pub required: &'static [&'static str],
    pub rules: &'static [FieldRule],
}

pub const JOB_TYPES: &[&str] = &["full-time", "part-time", "contract", "internship", "remote"];

pub const JOB_STATUSES: &[&str] = &[
    "saved",
    "applied",
    "interviewing",
    "rejected",
    "offered",
    "accepted",
    "declined",
];

pub const APPLICATION_STATUSES: &[&str] = &[
    "pending",
    "submitted",
    "reviewing",
    "phone_screen",
    "interview",
    "offer",
    "accepted",
    "rejected",
    "withdrawn",
];

pub const SKILL_LEVELS: &[&str] = &["beginner", "intermediate", "advanced", "expert"];

pub const PREFERENCE_THEMES: &[&str] = &["light", "dark", "system"];

pub const ALERT_CADENCES: &[&str] = &["daily", "weekly", "monthly"];

/// Returns the static schema for an entity kind.
pub fn schema_for(kind: EntityKind) -> &'static EntitySchema {
    match kind {
        EntityKind::Job => &EntitySchema {
            required: &["title", "company"],
            rules: &[
                FieldRule { field: "job_type", rule: Rule::Enum(JOB_TYPES) },
                FieldRule { field: "status", rule: Rule::Enum(JOB_STATUSES) },
                FieldRule { field: "match_score", rule: Rule::Range { min: 0.0, max: 100.0 } },
                FieldRule { field: "external_url", rule: Rule::Url },
            ],
        },
        EntityKind::Application => &EntitySchema {
            required: &["company", "position"],
            rules: &[
                FieldRule { field: "status", rule: Rule::Enum(APPLICATION_STATUSES) },
                FieldRule { field: "applied_date", rule: Rule::DateTime },
                FieldRule { field: "follow_up_date", rule: Rule::DateTime },
                FieldRule { field: "interview_date", rule: Rule::DateTime },
                FieldRule { field: "recruiter_email", rule: Rule::Email },
            ],
        },
        EntityKind::Resume => &EntitySchema {
            required: &["title"],
            rules: &[
                FieldRule { field: "title", rule: Rule::Length { min: 1, max: 100 } },
                FieldRule { field: "version_number", rule: Rule::Range { min: 1.0, max: 999.0 } },
                FieldRule { field: "ats_score", rule: Rule::Range { min: 0.0, max: 100.0 } },
                FieldRule { field: "is_default", rule: Rule::Boolean },
            ],
        },
        EntityKind::Contact => &EntitySchema {
            required: &["name"],
            rules: &[FieldRule { field: "email", rule: Rule::Email }],
        },
        EntityKind::Preferences => &EntitySchema {
            required: &[],
            rules: &[
                FieldRule { field: "theme", rule: Rule::Enum(PREFERENCE_THEMES) },
                FieldRule { field: "notifications", rule: Rule::Boolean },
            ],
        },
        EntityKind::BulletPoint => &EntitySchema {
            required: &["text"],
            rules: &[FieldRule { field: "topic", rule: Rule::Text }],
        },
        EntityKind::Skill => &EntitySchema {
            required: &["name"],
            rules: &[FieldRule { field: "level", rule: Rule::Enum(SKILL_LEVELS) }],
        },
        EntityKind::CoverLetter => &EntitySchema {
            required: &["title"],
            rules: &[
                FieldRule { field: "content", rule: Rule::Text },
                FieldRule { field: "job_id", rule: Rule::Text },
            ],
        },
        EntityKind::InterviewPrep => &EntitySchema {
            required: &["question"],
            rules: &[
                FieldRule { field: "answer", rule: Rule::Text },
                FieldRule { field: "job_id", rule: Rule::Text },
            ],
        },
        EntityKind::ApplicationEvent => &EntitySchema {
            required: &["application_id", "event_type"],
            rules: &[FieldRule { field: "occurred_at", rule: Rule::DateTime }],
        },
        EntityKind::AiInteraction => &EntitySchema {
            required: &["prompt"],
            rules: &[
                FieldRule { field: "response", rule: Rule::Text },
                FieldRule { field: "kind", rule: Rule::Text },
            ],
        },
        EntityKind::ResumeVersion => &EntitySchema {
            required: &["label"],
            rules: &[FieldRule { field: "content", rule: Rule::Text }],
        },
        EntityKind::LearningResource => &EntitySchema {
            required: &["title"],
            rules: &[
                FieldRule { field: "url", rule: Rule::Url },
                FieldRule { field: "tags", rule: Rule::TextArray },
            ],
        },
        EntityKind::CareerGoal => &EntitySchema {
            required: &["title"],
            rules: &[FieldRule { field: "deadline", rule: Rule::DateTime }],
        },
        EntityKind::JobOffer => &EntitySchema {
            required: &["job_id"],
            rules: &[
                FieldRule { field: "salary", rule: Rule::Number },
                FieldRule { field: "benefits", rule: Rule::TextArray },
            ],
        },
        EntityKind::PortfolioProject => &EntitySchema {
            required: &["title"],
            rules: &[
                FieldRule { field: "url", rule: Rule::Url },
                FieldRule { field: "description", rule: Rule::Text },
            ],
        },
        EntityKind::JobAlert => &EntitySchema {
            required: &["query", "cadence"],
            rules: &[FieldRule { field: "cadence", rule: Rule::Enum(ALERT_CADENCES) }],
        },
        EntityKind::Notification => &EntitySchema {
            required: &["type", "message"],
            rules: &[FieldRule { field: "read", rule: Rule::Boolean }],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_schema() {
        for kind in EntityKind::ALL {
            // Must not panic, and required-field lists must not contain blanks.
            let schema = schema_for(kind);
            for field in schema.required {
                assert!(!field.is_empty());
            }
        }
    }

    #[test]
    fn job_schema_pins_status_enum() {
        let schema = schema_for(EntityKind::Job);
        assert_eq!(schema.required, &["title", "company"]);
        let status_rule = schema
            .rules
            .iter()
            .find(|r| r.field == "status")
            .expect("job schema has a status rule");
        match status_rule.rule {
            Rule::Enum(values) => assert!(values.contains(&"interviewing")),
            _ => panic!("status rule must be an enum"),
        }
    }
}
