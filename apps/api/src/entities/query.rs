//! Filter-key translation and pagination parameter parsing for list requests.

use std::collections::HashMap;

use crate::errors::{AppError, FieldErrors};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Envelope columns shared by every entity table. Filter keys that translate
/// to one of these match the column itself; everything else matches inside the
/// `data` document.
const ENVELOPE_COLUMNS: [&str; 4] = ["id", "user_id", "created_at", "updated_at"];

/// Fixed aliases applied before the generic camelCase translation.
const KEY_ALIASES: [(&str, &str); 3] = [
    ("userId", "user_id"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// "appliedDate" -> "applied_date". Already-snake keys pass through unchanged.
pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Translates a raw filter key to its canonical snake_case form.
pub fn translate_key(raw: &str) -> String {
    for (alias, canonical) in KEY_ALIASES {
        if raw == alias {
            return canonical.to_string();
        }
    }
    camel_to_snake(raw)
}

/// Equality filters split by where they match: envelope columns vs `data` keys.
#[derive(Debug, Default)]
pub struct ListFilters {
    /// (column, value) — column names come from the closed envelope set.
    pub columns: Vec<(&'static str, String)>,
    /// (data key, value) — matched textually against `data->>key`.
    pub data: Vec<(String, String)>,
}

/// Extracts equality filters from the query string.
///
/// `page`/`limit` are pagination, not filters. Empty values are skipped, so
/// `?status=` matches nothing rather than matching empty strings.
pub fn parse_filters(params: &HashMap<String, String>) -> ListFilters {
    let mut filters = ListFilters::default();
    for (raw_key, value) in params {
        if raw_key == "page" || raw_key == "limit" || value.is_empty() {
            continue;
        }
        let key = translate_key(raw_key);
        match ENVELOPE_COLUMNS.into_iter().find(|c| *c == key) {
            Some(column) => filters.columns.push((column, value.clone())),
            None => filters.data.push((key, value.clone())),
        }
    }
    // Deterministic ordering for the generated SQL.
    filters.columns.sort();
    filters.data.sort();
    filters
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Parses `page` (default 1) and `limit` (default 20, max 100).
///
/// Out-of-range or non-numeric values are reported as a 400 with a field map
/// instead of being silently clamped.
pub fn parse_pagination(params: &HashMap<String, String>) -> Result<Pagination, AppError> {
    let mut errors = FieldErrors::new();

    let page = match params.get("page") {
        None => DEFAULT_PAGE,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n >= 1 => n,
            _ => {
                errors.insert("page".into(), "Page must be a positive number".into());
                DEFAULT_PAGE
            }
        },
    };

    let limit = match params.get("limit") {
        None => DEFAULT_LIMIT,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if (1..=MAX_LIMIT).contains(&n) => n,
            _ => {
                errors.insert("limit".into(), "Limit must be between 1 and 100".into());
                DEFAULT_LIMIT
            }
        },
    };

    if !errors.is_empty() {
        return Err(AppError::InvalidParams(errors));
    }
    Ok(Pagination { page, limit })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn camel_keys_translate_to_snake() {
        assert_eq!(camel_to_snake("appliedDate"), "applied_date");
        assert_eq!(camel_to_snake("status"), "status");
        assert_eq!(camel_to_snake("jobId"), "job_id");
    }

    #[test]
    fn aliases_take_precedence() {
        assert_eq!(translate_key("userId"), "user_id");
        assert_eq!(translate_key("createdAt"), "created_at");
        assert_eq!(translate_key("updatedAt"), "updated_at");
    }

    #[test]
    fn filters_split_between_columns_and_data() {
        let filters = parse_filters(&params(&[
            ("status", "applied"),
            ("createdAt", "2025-01-01"),
            ("page", "2"),
        ]));
        assert_eq!(filters.columns, vec![("created_at", "2025-01-01".to_string())]);
        assert_eq!(filters.data, vec![("status".to_string(), "applied".to_string())]);
    }

    #[test]
    fn empty_filter_values_are_skipped() {
        let filters = parse_filters(&params(&[("status", ""), ("company", "Acme")]));
        assert!(filters.columns.is_empty());
        assert_eq!(filters.data, vec![("company".to_string(), "Acme".to_string())]);
    }

    #[test]
    fn pagination_defaults() {
        let p = parse_pagination(&params(&[])).expect("defaults are valid");
        assert_eq!(p, Pagination { page: 1, limit: 20 });
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn pagination_offset() {
        let p = parse_pagination(&params(&[("page", "3"), ("limit", "25")])).unwrap();
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn pagination_rejects_out_of_range() {
        let err = parse_pagination(&params(&[("page", "0"), ("limit", "250")])).unwrap_err();
        match err {
            AppError::InvalidParams(fields) => {
                assert_eq!(
                    fields.get("page").map(String::as_str),
                    Some("Page must be a positive number")
                );
                assert_eq!(
                    fields.get("limit").map(String::as_str),
                    Some("Limit must be between 1 and 100")
                );
            }
            other => panic!("expected InvalidParams, got {other:?}"),
        }
    }

    #[test]
    fn pagination_rejects_non_numeric() {
        assert!(parse_pagination(&params(&[("page", "abc")])).is_err());
        assert!(parse_pagination(&params(&[("limit", "-5")])).is_err());
    }
}
