use crate::AppState;
use crate::error::{Result as ServerErrorResult, ServerError};

use std::time::Duration;

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Metrics collector for account deletion requests
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            prefix: "mt_server.account_deletion",
        }
    }

    /// Record an incoming deletion request
    pub fn requested(&self) {
        counter!(format!("{}.requests", self.prefix)).increment(1);
    }

    /// Record a completed deletion
    pub fn succeeded(&self) {
        counter!(format!("{}.succeeded", self.prefix)).increment(1);
    }

    /// Record a rejected or failed deletion, by callable status
    pub fn failed(&self, status: &str) {
        counter!(format!("{}.failed", self.prefix)).increment(1);
        counter!(format!("{}.failed.{}", self.prefix, status.to_lowercase())).increment(1);
    }

    /// Record end-to-end handler latency
    pub fn latency(&self, duration: Duration) {
        histogram!(format!("{}.latency_ms", self.prefix)).record(duration.as_millis() as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global Prometheus recorder
pub fn install_recorder() -> ServerErrorResult<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics {
            message: format!("Failed to install Prometheus recorder: {e}"),
        })
}

/// GET /metrics - Prometheus text exposition
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics_handle {
        Some(ref handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Metrics disabled").into_response(),
    }
}
