//! Rule evaluation for entity payloads.
//!
//! Produces field-keyed error maps (`{"status": "Status must be one of: ..."}`)
//! rather than a single message, so clients can attach errors to form fields.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::entities::registry::EntityKind;
use crate::entities::schema::{schema_for, Rule};
use crate::errors::FieldErrors;

/// A value counts as absent when the key is missing, null, or an empty string.
fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Minimal URL shape check: `scheme://rest` with an alphabetic scheme.
pub fn is_valid_url(url: &str) -> bool {
    match url.split_once("://") {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphabetic())
                && !rest.is_empty()
        }
        None => false,
    }
}

/// Accepts RFC 3339 date-times and plain `YYYY-MM-DD` dates.
pub fn is_valid_date(value: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(value).is_ok()
        || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// "job_type" -> "Job type", for the human-readable rule messages.
fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Formats a range bound without a trailing `.0` for whole numbers.
fn bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Validates a full entity document against the kind's schema.
///
/// Returns an empty map when the document passes. Unknown fields are ignored —
/// the schemas are open, only declared fields are checked.
pub fn validate_document(kind: EntityKind, doc: &Value) -> FieldErrors {
    let schema = schema_for(kind);
    let mut errors = FieldErrors::new();

    for field in schema.required {
        if is_empty(doc.get(*field)) {
            errors.insert((*field).to_string(), format!("{field} is required"));
        }
    }

    for rule in schema.rules {
        let value = match doc.get(rule.field) {
            Some(v) if !v.is_null() => v,
            _ => continue,
        };
        // Empty strings were either caught by the required pass or are
        // treated as absent, matching the adapter's undefined-skipping.
        if matches!(value, Value::String(s) if s.is_empty()) {
            continue;
        }
        if let Some(message) = check_rule(rule.field, &rule.rule, value) {
            // Required-field errors win over rule errors for the same field.
            errors.entry(rule.field.to_string()).or_insert(message);
        }
    }

    errors
}

fn check_rule(field: &str, rule: &Rule, value: &Value) -> Option<String> {
    match rule {
        Rule::Enum(allowed) => {
            let ok = value.as_str().is_some_and(|s| allowed.contains(&s));
            (!ok).then(|| format!("{} must be one of: {}", humanize(field), allowed.join(", ")))
        }
        Rule::Range { min, max } => {
            let ok = value.as_f64().is_some_and(|n| n >= *min && n <= *max);
            (!ok).then(|| {
                format!(
                    "{} must be between {} and {}",
                    humanize(field),
                    bound(*min),
                    bound(*max)
                )
            })
        }
        Rule::Length { min, max } => {
            let ok = value
                .as_str()
                .is_some_and(|s| s.chars().count() >= *min && s.chars().count() <= *max);
            (!ok).then(|| {
                format!(
                    "{} must be between {min} and {max} characters",
                    humanize(field)
                )
            })
        }
        Rule::Email => {
            let ok = value.as_str().is_some_and(is_valid_email);
            (!ok).then(|| "Invalid email format".to_string())
        }
        Rule::Url => {
            let ok = value.as_str().is_some_and(is_valid_url);
            (!ok).then(|| "Invalid URL format".to_string())
        }
        Rule::DateTime => {
            let ok = value.as_str().is_some_and(is_valid_date);
            (!ok).then(|| "Invalid date format".to_string())
        }
        Rule::Boolean => {
            (!value.is_boolean()).then(|| format!("{} must be a boolean", humanize(field)))
        }
        Rule::Number => {
            (!value.is_number()).then(|| format!("{} must be a number", humanize(field)))
        }
        Rule::Text => (!value.is_string()).then(|| format!("{} must be a string", humanize(field))),
        Rule::TextArray => {
            let ok = value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string));
            (!ok).then(|| format!("{} must be an array of strings", humanize(field)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_required_fields_are_reported_per_field() {
        let errors = validate_document(EntityKind::Job, &json!({}));
        assert_eq!(errors.get("title").map(String::as_str), Some("title is required"));
        assert_eq!(
            errors.get("company").map(String::as_str),
            Some("company is required")
        );
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let errors = validate_document(EntityKind::Job, &json!({"title": "", "company": "Acme"}));
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("title"));
    }

    #[test]
    fn invalid_application_status_is_rejected() {
        let errors = validate_document(
            EntityKind::Application,
            &json!({"company": "Acme", "position": "Engineer", "status": "ghosted"}),
        );
        let message = errors.get("status").expect("status error present");
        assert!(message.starts_with("Status must be one of:"));
        assert!(message.contains("withdrawn"));
    }

    #[test]
    fn valid_application_passes() {
        let errors = validate_document(
            EntityKind::Application,
            &json!({
                "company": "Acme",
                "position": "Engineer",
                "status": "phone_screen",
                "applied_date": "2025-11-03",
                "recruiter_email": "jo@acme.example"
            }),
        );
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn match_score_range_is_enforced() {
        let errors = validate_document(
            EntityKind::Job,
            &json!({"title": "Dev", "company": "Acme", "match_score": 101}),
        );
        assert_eq!(
            errors.get("match_score").map(String::as_str),
            Some("Match score must be between 0 and 100")
        );
    }

    #[test]
    fn resume_title_length_and_version_bounds() {
        let long_title = "x".repeat(101);
        let errors = validate_document(
            EntityKind::Resume,
            &json!({"title": long_title, "version_number": 1000}),
        );
        assert_eq!(
            errors.get("title").map(String::as_str),
            Some("Title must be between 1 and 100 characters")
        );
        assert_eq!(
            errors.get("version_number").map(String::as_str),
            Some("Version number must be between 1 and 999")
        );
    }

    #[test]
    fn url_and_email_formats() {
        let errors = validate_document(
            EntityKind::Job,
            &json!({"title": "Dev", "company": "Acme", "external_url": "not-a-url"}),
        );
        assert_eq!(
            errors.get("external_url").map(String::as_str),
            Some("Invalid URL format")
        );

        let errors = validate_document(
            EntityKind::Contact,
            &json!({"name": "Jo", "email": "jo@nodot"}),
        );
        assert_eq!(errors.get("email").map(String::as_str), Some("Invalid email format"));

        assert!(is_valid_url("https://example.com/jobs/1"));
        assert!(is_valid_email("a@b.co"));
    }

    #[test]
    fn unknown_fields_pass_through() {
        let errors = validate_document(
            EntityKind::BulletPoint,
            &json!({"text": "Shipped the thing", "color": "teal", "weight": 3}),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn job_alert_cadence_enum() {
        let errors = validate_document(
            EntityKind::JobAlert,
            &json!({"query": "rust", "cadence": "hourly"}),
        );
        assert!(errors
            .get("cadence")
            .expect("cadence error present")
            .starts_with("Cadence must be one of:"));
    }

    #[test]
    fn required_error_wins_over_rule_error() {
        // cadence is both required and enum-checked; absence reports "is required".
        let errors = validate_document(EntityKind::JobAlert, &json!({"query": "rust"}));
        assert_eq!(
            errors.get("cadence").map(String::as_str),
            Some("cadence is required")
        );
    }
}
