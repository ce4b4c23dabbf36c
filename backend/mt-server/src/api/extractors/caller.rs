//! Axum extractor for the callable caller identity

use crate::{ApiError, AppState};

use mt_auth::authenticate;
use mt_core::CallerContext;

use std::future::Future;
use std::panic::Location;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use error_location::ErrorLocation;

/// Verified caller identity for the request.
///
/// No `Authorization` header yields an anonymous caller, which the handler
/// rejects. A header that is present but fails verification is rejected here.
pub struct Caller(pub CallerContext);

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let Some(header_value) = parts.headers.get(AUTHORIZATION) else {
                log::debug!("No Authorization header, caller is anonymous");
                return Ok(Caller(CallerContext::anonymous()));
            };

            let header = header_value.to_str().map_err(|_| ApiError::Unauthenticated {
                message: "Authorization header is not valid ASCII.".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let auth = authenticate(&state.jwt_validator, Some(header))?;
            log::debug!("Verified caller {}", auth.uid);

            Ok(Caller(CallerContext::authenticated(auth)))
        }
    }
}
