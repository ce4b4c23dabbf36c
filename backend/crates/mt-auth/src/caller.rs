use crate::{AuthError, Claims, JwtValidator, Result as AuthErrorResult};

use mt_core::{AuthContext, SignInProvider, Uid};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization` header value
#[track_caller]
pub fn bearer_token(header: Option<&str>) -> AuthErrorResult<&str> {
    let header = header.ok_or_else(|| AuthError::MissingHeader {
        location: ErrorLocation::from(Location::caller()),
    })?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        })?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidToken {
            message: "empty bearer token".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(token)
}

/// Build the verified caller identity from validated claims
#[track_caller]
pub fn auth_context_from_claims(claims: Claims) -> AuthErrorResult<AuthContext> {
    let uid = Uid::parse(claims.sub).map_err(|e| AuthError::InvalidClaim {
        claim: "sub".to_string(),
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let provider = match claims.sign_in_provider.as_deref() {
        None => None,
        Some(value) => match SignInProvider::from_str(value) {
            Ok(provider) => Some(provider),
            Err(_) => {
                log::debug!("Ignoring unknown sign-in provider '{}'", value);
                None
            }
        },
    };

    Ok(AuthContext {
        uid,
        email: claims.email,
        provider,
    })
}

/// Verify an `Authorization` header value end to end
#[track_caller]
pub fn authenticate(validator: &JwtValidator, header: Option<&str>) -> AuthErrorResult<AuthContext> {
    let token = bearer_token(header)?;
    let claims = validator.validate(token)?;
    auth_context_from_claims(claims)
}
