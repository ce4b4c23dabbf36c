use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use sqlx::SqlitePool;

async fn probe(pool: &SqlitePool) -> bool {
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => true,
        Err(e) => {
            log::warn!("Database probe failed: {}", e);
            false
        }
    }
}

fn component_status(healthy: bool) -> &'static str {
    if healthy { "operational" } else { "unavailable" }
}

/// GET /health - Health check with component status
pub async fn health_check(State(state): State<AppState>) -> Response {
    let store_ok = probe(&state.store_pool).await;
    let identity_ok = probe(&state.identity_pool).await;
    let healthy = store_ok && identity_ok;

    let health = json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "document_store": component_status(store_ok),
            "identity_provider": component_status(identity_ok),
            "metrics": if state.metrics_handle.is_some() { "enabled" } else { "disabled" },
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - Liveness probe (is the process alive?)
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - Readiness probe: both databases must answer
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    if probe(&state.store_pool).await && probe(&state.identity_pool).await {
        (StatusCode::OK, "Ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Not ready").into_response()
    }
}
