//! Account deletion callable

use crate::{ApiError, ApiResult, AppState, CallableRequest, CallableResponse, Caller};

use mt_core::{CallerContext, DeleteAccountResponse};

use std::time::Instant;

use axum::{Json, body::Bytes, extract::State};
use uuid::Uuid;

/// POST /deleteAccount
///
/// Deletes every document under the caller's data root, then the caller's
/// identity record. The target is always the verified caller.
pub async fn delete_account(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Bytes,
) -> ApiResult<Json<CallableResponse<DeleteAccountResponse>>> {
    let request_id = Uuid::new_v4();
    let started = Instant::now();
    state.metrics.requested();
    log::debug!("deleteAccount {}: started", request_id);

    let result = run(&state, caller, &body).await;

    let elapsed = started.elapsed();
    state.metrics.latency(elapsed);
    match &result {
        Ok(_) => state.metrics.succeeded(),
        Err(e) => state.metrics.failed(e.status()),
    }
    log::info!(
        "deleteAccount {}: {} in {}",
        request_id,
        match &result {
            Ok(_) => "OK",
            Err(e) => e.status(),
        },
        humantime::format_duration(elapsed)
    );

    result
}

async fn run(
    state: &AppState,
    caller: CallerContext,
    body: &[u8],
) -> ApiResult<Json<CallableResponse<DeleteAccountResponse>>> {
    parse_request(body)?;

    if let Some(uid) = caller.uid() {
        state.rate_limiter.check(uid)?;
    }

    let response = state.account_deletion.delete_account(&caller).await?;

    Ok(Json(CallableResponse::new(response)))
}

/// Empty body, or a JSON object carrying `data`
fn parse_request(body: &[u8]) -> ApiResult<Option<CallableRequest>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice::<CallableRequest>(body)
        .map(Some)
        .map_err(|e| ApiError::invalid_argument(format!("Bad Request: {}", e)))
}
