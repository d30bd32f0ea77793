//! Read-only HTTP surface over the theme asset registry.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::Json;
use serde_json::{json, Value};

use crate::errors::{AppError, FieldErrors};
use crate::themes::assets::{
    all_versions, asset_url, effective_version, AssetKind, ThemeMode, ThemeName,
    FALLBACK_IMAGE_URL,
};

fn resolve_theme(name: &str) -> Result<ThemeName, AppError> {
    ThemeName::from_str(name).ok_or_else(|| AppError::NotFound(format!("Unknown theme: {name}")))
}

/// Mode defaults to Light when the query param is absent.
fn resolve_mode(params: &HashMap<String, String>) -> Result<ThemeMode, AppError> {
    match params.get("mode") {
        None => Ok(ThemeMode::Light),
        Some(raw) => ThemeMode::from_str(raw)
            .ok_or_else(|| AppError::NotFound(format!("Unknown theme mode: {raw}"))),
    }
}

fn resolve_version(params: &HashMap<String, String>) -> Result<usize, AppError> {
    match params.get("v") {
        None => Ok(0),
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            let mut errors = FieldErrors::new();
            errors.insert("v".into(), "Version must be a non-negative number".into());
            AppError::InvalidParams(errors)
        }),
    }
}

/// GET /api/v1/themes
pub async fn list_themes() -> Json<Value> {
    Json(json!({
        "themes": ThemeName::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
        "modes": ThemeMode::ALL.iter().map(|m| m.as_str()).collect::<Vec<_>>(),
        "asset_kinds": AssetKind::ALL.iter().map(|k| k.as_str()).collect::<Vec<_>>(),
        "fallback_url": FALLBACK_IMAGE_URL,
    }))
}

/// GET /api/v1/themes/:theme/assets?mode=
///
/// Every asset group for the theme and mode, keyed by asset kind.
pub async fn theme_assets(
    Path(theme): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let theme = resolve_theme(&theme)?;
    let mode = resolve_mode(&params)?;

    let mut groups = serde_json::Map::new();
    for kind in AssetKind::ALL {
        groups.insert(
            kind.as_str().to_string(),
            json!(all_versions(theme, mode, kind)),
        );
    }

    Ok(Json(json!({
        "theme": theme.as_str(),
        "mode": mode.as_str(),
        "assets": groups,
    })))
}

/// GET /api/v1/themes/:theme/assets/:kind?mode=&v=
///
/// `v` is a zero-based version index; an out-of-range index answers with
/// version 1 of the same group rather than a 404.
pub async fn theme_asset(
    Path((theme, kind)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let theme = resolve_theme(&theme)?;
    let kind = AssetKind::from_str(&kind)
        .ok_or_else(|| AppError::NotFound(format!("Unknown asset kind: {kind}")))?;
    let mode = resolve_mode(&params)?;
    let requested = resolve_version(&params)?;

    let version = effective_version(theme, mode, kind, requested);
    Ok(Json(json!({
        "theme": theme.as_str(),
        "mode": mode.as_str(),
        "kind": kind.as_str(),
        "version": version,
        "url": asset_url(theme, mode, kind, version),
    })))
}
