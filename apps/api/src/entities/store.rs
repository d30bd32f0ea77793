//! The jsonb-backed entity store.
//!
//! Every table shares the same envelope, so the queries are generated from the
//! registry enum. Filter keys and values are always bound as parameters; the
//! only interpolated identifiers are the compile-time table/column constants.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::entities::query::{ListFilters, Pagination};
use crate::entities::registry::EntityKind;
use crate::errors::AppError;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, data, created_at, updated_at";

/// One row of any entity table: the envelope plus the free-form document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EntityRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub data: Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Appends the owner scope and equality filters, returning the WHERE clause.
///
/// Envelope columns compare as text (the adapter's loose string equality);
/// data keys compare against `data->>key` with the key itself bound, never
/// spliced into the SQL.
fn where_clause(filters: &ListFilters) -> String {
    let mut clause = String::from("WHERE user_id = $1");
    let mut idx = 2;
    for (column, _) in &filters.columns {
        clause.push_str(&format!(" AND {column}::text = ${idx}"));
        idx += 1;
    }
    for _ in &filters.data {
        clause.push_str(&format!(" AND data->>${} = ${}", idx, idx + 1));
        idx += 2;
    }
    clause
}

/// Lists the owner's rows newest-first with the given filters, returning the
/// page of rows and the total matching count.
pub async fn list(
    pool: &PgPool,
    kind: EntityKind,
    user_id: Uuid,
    filters: &ListFilters,
    page: &Pagination,
) -> Result<(Vec<EntityRow>, i64), sqlx::Error> {
    let table = kind.table();
    let clause = where_clause(filters);

    let count_sql = format!("SELECT COUNT(*) FROM {table} {clause}");
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(user_id);
    for (_, value) in &filters.columns {
        count_query = count_query.bind(value);
    }
    for (key, value) in &filters.data {
        count_query = count_query.bind(key).bind(value);
    }
    let total = count_query.fetch_one(pool).await?;

    let next = 2 + filters.columns.len() + filters.data.len() * 2;
    let list_sql = format!(
        "SELECT {COLUMNS} FROM {table} {clause} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
        next,
        next + 1
    );
    let mut list_query = sqlx::query_as::<_, EntityRow>(&list_sql).bind(user_id);
    for (_, value) in &filters.columns {
        list_query = list_query.bind(value);
    }
    for (key, value) in &filters.data {
        list_query = list_query.bind(key).bind(value);
    }
    let rows = list_query
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok((rows, total))
}

/// Fetches one owned row. Rows belonging to other users are invisible.
pub async fn find(
    pool: &PgPool,
    kind: EntityKind,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<EntityRow>, sqlx::Error> {
    let sql = format!(
        "SELECT {COLUMNS} FROM {} WHERE id = $1 AND user_id = $2",
        kind.table()
    );
    sqlx::query_as::<_, EntityRow>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Inserts a validated document with a generated id, returning the new row.
pub async fn insert(
    pool: &PgPool,
    kind: EntityKind,
    user_id: Uuid,
    data: &Value,
) -> Result<EntityRow, sqlx::Error> {
    let sql = format!(
        "INSERT INTO {} (id, user_id, data) VALUES ($1, $2, $3) RETURNING {COLUMNS}",
        kind.table()
    );
    sqlx::query_as::<_, EntityRow>(&sql)
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(data)
        .fetch_one(pool)
        .await
}

fn update_sql(kind: EntityKind) -> String {
    format!(
        "UPDATE {} SET data = $1, updated_at = NOW() WHERE id = $2 AND user_id = $3 RETURNING {COLUMNS}",
        kind.table()
    )
}

/// Replaces the document of an owned row and bumps `updated_at`.
/// Returns `None` for missing or foreign rows.
pub async fn update(
    pool: &PgPool,
    kind: EntityKind,
    user_id: Uuid,
    id: Uuid,
    data: &Value,
) -> Result<Option<EntityRow>, sqlx::Error> {
    let sql = update_sql(kind);
    sqlx::query_as::<_, EntityRow>(&sql)
        .bind(data)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Deletes an owned row. Returns `true` if a row was removed.
pub async fn remove(
    pool: &PgPool,
    kind: EntityKind,
    user_id: Uuid,
    id: Uuid,
) -> Result<bool, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", kind.table());
    let result = sqlx::query(&sql).bind(id).bind(user_id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

/// Counts the owner's rows in one entity table (tier limits, usage, stats).
pub async fn count_owned(
    pool: &PgPool,
    kind: EntityKind,
    user_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE user_id = $1", kind.table());
    sqlx::query_scalar::<_, i64>(&sql)
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Clears `is_default` on all of the owner's resumes except `keep`.
/// At most one resume per owner stays default after any create or update.
pub async fn clear_other_default_resumes(
    pool: &PgPool,
    user_id: Uuid,
    keep: Option<Uuid>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE resumes
        SET data = jsonb_set(data, '{is_default}', 'false'::jsonb), updated_at = NOW()
        WHERE user_id = $1
          AND data->>'is_default' = 'true'
          AND ($2::uuid IS NULL OR id <> $2)
        "#,
    )
    .bind(user_id)
    .bind(keep)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Shallow merge of a patch into an existing document. Top-level keys from the
/// patch win; `null` in the patch removes the key (jsonb `||` semantics minus
/// the nulls, which the adapter treated as deletions).
pub fn merge_shallow(existing: &Value, patch: &Value) -> Value {
    let mut merged = match existing {
        Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };
    if let Value::Object(patch_map) = patch {
        for (key, value) in patch_map {
            if value.is_null() {
                merged.remove(key);
            } else {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(merged)
}

/// Pluggable entity persistence. Carried in `AppState` as
/// `Arc<dyn EntityStore>` so handler behavior can be exercised without
/// Postgres, same seam as `UsageCounter`.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn list(
        &self,
        kind: EntityKind,
        user_id: Uuid,
        filters: &ListFilters,
        page: &Pagination,
    ) -> Result<(Vec<EntityRow>, i64), AppError>;

    async fn find(
        &self,
        kind: EntityKind,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<EntityRow>, AppError>;

    async fn insert(
        &self,
        kind: EntityKind,
        user_id: Uuid,
        data: &Value,
    ) -> Result<EntityRow, AppError>;

    async fn update(
        &self,
        kind: EntityKind,
        user_id: Uuid,
        id: Uuid,
        data: &Value,
    ) -> Result<Option<EntityRow>, AppError>;

    async fn remove(&self, kind: EntityKind, user_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    async fn clear_other_default_resumes(
        &self,
        user_id: Uuid,
        keep: Option<Uuid>,
    ) -> Result<u64, AppError>;
}

/// Default store backed by the entity tables.
pub struct PgEntityStore {
    pub pool: PgPool,
}

#[async_trait]
impl EntityStore for PgEntityStore {
    async fn list(
        &self,
        kind: EntityKind,
        user_id: Uuid,
        filters: &ListFilters,
        page: &Pagination,
    ) -> Result<(Vec<EntityRow>, i64), AppError> {
        Ok(list(&self.pool, kind, user_id, filters, page).await?)
    }

    async fn find(
        &self,
        kind: EntityKind,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<EntityRow>, AppError> {
        Ok(find(&self.pool, kind, user_id, id).await?)
    }

    async fn insert(
        &self,
        kind: EntityKind,
        user_id: Uuid,
        data: &Value,
    ) -> Result<EntityRow, AppError> {
        Ok(insert(&self.pool, kind, user_id, data).await?)
    }

    async fn update(
        &self,
        kind: EntityKind,
        user_id: Uuid,
        id: Uuid,
        data: &Value,
    ) -> Result<Option<EntityRow>, AppError> {
        Ok(update(&self.pool, kind, user_id, id, data).await?)
    }

    async fn remove(&self, kind: EntityKind, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        Ok(remove(&self.pool, kind, user_id, id).await?)
    }

    async fn clear_other_default_resumes(
        &self,
        user_id: Uuid,
        keep: Option<Uuid>,
    ) -> Result<u64, AppError> {
        Ok(clear_other_default_resumes(&self.pool, user_id, keep).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::query::parse_filters;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn merge_overwrites_and_keeps() {
        let existing = json!({"title": "Old", "company": "Acme", "notes": "keep"});
        let patch = json!({"title": "New"});
        let merged = merge_shallow(&existing, &patch);
        assert_eq!(merged["title"], "New");
        assert_eq!(merged["company"], "Acme");
        assert_eq!(merged["notes"], "keep");
    }

    #[test]
    fn merge_null_removes_key() {
        let merged = merge_shallow(&json!({"a": 1, "b": 2}), &json!({"b": null}));
        assert_eq!(merged, json!({"a": 1}));
    }

    #[test]
    fn merge_is_shallow_not_deep() {
        let existing = json!({"meta": {"x": 1, "y": 2}});
        let patch = json!({"meta": {"x": 9}});
        let merged = merge_shallow(&existing, &patch);
        assert_eq!(merged["meta"], json!({"x": 9}));
    }

    #[test]
    fn where_clause_numbers_placeholders() {
        let params: HashMap<String, String> = [
            ("status".to_string(), "applied".to_string()),
            ("createdAt".to_string(), "2025-01-01".to_string()),
        ]
        .into();
        let filters = parse_filters(&params);
        assert_eq!(
            where_clause(&filters),
            "WHERE user_id = $1 AND created_at::text = $2 AND data->>$3 = $4"
        );
    }

    #[test]
    fn update_statement_bumps_updated_at_and_scopes_owner() {
        let sql = update_sql(EntityKind::Job);
        assert!(sql.contains("SET data = $1, updated_at = NOW()"));
        assert!(sql.contains("WHERE id = $2 AND user_id = $3"));
    }

    #[test]
    fn where_clause_without_filters() {
        let filters = parse_filters(&HashMap::new());
        assert_eq!(where_clause(&filters), "WHERE user_id = $1");
    }
}
