use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::entities::store::EntityStore;
use crate::tiers::UsageCounter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable per-owner row counter used for tier limit checks.
    /// Default: `PgUsageCounter` against the entity tables.
    pub usage: Arc<dyn UsageCounter>,
    /// Pluggable entity persistence. Default: `PgEntityStore`.
    pub store: Arc<dyn EntityStore>,
}
