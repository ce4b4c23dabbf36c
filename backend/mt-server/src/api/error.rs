//! Callable protocol errors
//!
//! Every failure is rendered as
//! `{"error": {"status": KIND, "message": "...", "details": {...}}}`
//! with the HTTP status derived from the kind.

use mt_auth::AuthError;
use mt_core::AccountDeletionError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Callable status, e.g. "UNAUTHENTICATED", "UNAVAILABLE"
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ApiErrorDetails>,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorDetails {
    /// "store" or "identity"
    pub stage: &'static str,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unverifiable caller identity (401)
    #[error("Unauthenticated: {message} {location}")]
    Unauthenticated {
        message: String,
        location: ErrorLocation,
    },

    /// Malformed callable request (400)
    #[error("Invalid argument: {message} {location}")]
    InvalidArgument {
        message: String,
        location: ErrorLocation,
    },

    /// Per-caller rate limit hit (429)
    #[error("Resource exhausted: {message} {location}")]
    ResourceExhausted {
        message: String,
        location: ErrorLocation,
    },

    /// Account deletion failed; status follows the failing collaborator
    #[error("Account deletion failed: {source} {location}")]
    AccountDeletion {
        #[source]
        source: AccountDeletionError,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Callable status string
    pub fn status(&self) -> &'static str {
        match self {
            Self::Unauthenticated { .. } => "UNAUTHENTICATED",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::ResourceExhausted { .. } => "RESOURCE_EXHAUSTED",
            Self::AccountDeletion { source, .. } => source.kind(),
            Self::Internal { .. } => "INTERNAL",
        }
    }

    fn into_body(self) -> ApiErrorBody {
        let status = self.status().to_string();

        let (message, details) = match self {
            Self::Unauthenticated { message, .. }
            | Self::InvalidArgument { message, .. }
            | Self::ResourceExhausted { message, .. }
            | Self::Internal { message, .. } => (message, None),
            Self::AccountDeletion { source, .. } => (
                source.message(),
                source.stage().map(|stage| ApiErrorDetails { stage }),
            ),
        };

        ApiErrorBody {
            status,
            message,
            details,
        }
    }
}

/// HTTP status for a callable status string
pub fn http_status(status: &str) -> StatusCode {
    match status {
        "INVALID_ARGUMENT" => StatusCode::BAD_REQUEST,
        "UNAUTHENTICATED" => StatusCode::UNAUTHORIZED,
        "PERMISSION_DENIED" => StatusCode::FORBIDDEN,
        "NOT_FOUND" => StatusCode::NOT_FOUND,
        "ALREADY_EXISTS" | "ABORTED" => StatusCode::CONFLICT,
        "RESOURCE_EXHAUSTED" => StatusCode::TOO_MANY_REQUESTS,
        "UNAVAILABLE" => StatusCode::SERVICE_UNAVAILABLE,
        "DEADLINE_EXCEEDED" => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Caller mistakes are routine; only server-side failures are errors
        match self {
            Self::Unauthenticated { .. }
            | Self::InvalidArgument { .. }
            | Self::ResourceExhausted { .. } => log::warn!("{}", self),
            _ => log::error!("{}", self),
        }

        let status = http_status(self.status());

        let body = ApiErrorResponse {
            error: self.into_body(),
        };

        (status, Json(body)).into_response()
    }
}

/// Convert caller verification errors to API errors
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        log::debug!("Caller verification failed: {}", e);
        match e {
            AuthError::RateLimitExceeded { .. } => ApiError::ResourceExhausted {
                message: e.client_message(),
                location: ErrorLocation::from(Location::caller()),
            },
            _ => ApiError::Unauthenticated {
                message: e.client_message(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

/// Convert account deletion errors to API errors
impl From<AccountDeletionError> for ApiError {
    #[track_caller]
    fn from(e: AccountDeletionError) -> Self {
        match e {
            AccountDeletionError::Unauthenticated { message, .. } => ApiError::Unauthenticated {
                message,
                location: ErrorLocation::from(Location::caller()),
            },
            source => ApiError::AccountDeletion {
                source,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
