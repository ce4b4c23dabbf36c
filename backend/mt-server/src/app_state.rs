use crate::Metrics;

use mt_auth::{CallerRateLimiter, JwtValidator};
use mt_core::AccountDeletionService;

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::SqlitePool;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub account_deletion: AccountDeletionService,
    pub jwt_validator: Arc<JwtValidator>,
    pub rate_limiter: Arc<CallerRateLimiter>,
    pub metrics: Metrics,
    /// None when metrics are disabled
    pub metrics_handle: Option<PrometheusHandle>,
    /// Probed by the health endpoints
    pub store_pool: SqlitePool,
    pub identity_pool: SqlitePool,
}
