use crate::ApiError;
use crate::api::error::http_status;

use mt_auth::AuthError;
use mt_core::{AccountDeletionError, ErrorKind, IdentityError, StoreError};

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_unauthenticated_returns_401_without_details() {
    let error = ApiError::Unauthenticated {
        message: "The function must be called while authenticated.".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"]["status"], "UNAUTHENTICATED");
    assert!(json["error"].get("details").is_none());
}

#[tokio::test]
async fn test_store_failure_carries_kind_and_stage() {
    let error = ApiError::from(AccountDeletionError::StoreFailure {
        source: StoreError::operation(ErrorKind::Unavailable, "Database temporarily unavailable"),
        location: ErrorLocation::from(Location::caller()),
    });
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["error"]["status"], "UNAVAILABLE");
    assert_eq!(json["error"]["message"], "Database temporarily unavailable");
    assert_eq!(json["error"]["details"]["stage"], "store");
}

#[tokio::test]
async fn test_identity_failure_carries_identity_stage() {
    let error = ApiError::from(AccountDeletionError::IdentityProviderFailure {
        source: IdentityError::operation(ErrorKind::PermissionDenied, "Access denied"),
        location: ErrorLocation::from(Location::caller()),
    });
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["error"]["status"], "PERMISSION_DENIED");
    assert_eq!(json["error"]["details"]["stage"], "identity");
}

#[test]
fn test_unauthenticated_deletion_error_maps_to_unauthenticated() {
    let error = ApiError::from(AccountDeletionError::unauthenticated("no caller"));

    assert!(matches!(error, ApiError::Unauthenticated { .. }));
    assert_eq!(error.status(), "UNAUTHENTICATED");
}

#[test]
fn test_rate_limit_auth_error_maps_to_resource_exhausted() {
    let error = ApiError::from(AuthError::RateLimitExceeded {
        limit: 5,
        window_secs: 60,
        location: ErrorLocation::from(Location::caller()),
    });

    assert_eq!(error.status(), "RESOURCE_EXHAUSTED");
    assert_eq!(http_status(error.status()), StatusCode::TOO_MANY_REQUESTS);
}

#[test]
fn test_expired_token_maps_to_unauthenticated_with_client_message() {
    let error = ApiError::from(AuthError::TokenExpired {
        location: ErrorLocation::from(Location::caller()),
    });

    match error {
        ApiError::Unauthenticated { message, .. } => {
            assert_eq!(message, "The provided ID token has expired.")
        }
        other => panic!("Expected Unauthenticated, got {other:?}"),
    }
}

#[test]
fn test_http_status_mapping() {
    assert_eq!(http_status("INVALID_ARGUMENT"), StatusCode::BAD_REQUEST);
    assert_eq!(http_status("NOT_FOUND"), StatusCode::NOT_FOUND);
    assert_eq!(http_status("ALREADY_EXISTS"), StatusCode::CONFLICT);
    assert_eq!(http_status("ABORTED"), StatusCode::CONFLICT);
    assert_eq!(http_status("DEADLINE_EXCEEDED"), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(http_status("INTERNAL"), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(http_status("SOMETHING_ELSE"), StatusCode::INTERNAL_SERVER_ERROR);
}
