use crate::{AuthError, Result as AuthErrorResult};

use mt_core::MAX_UID_LENGTH;

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// ID token claims issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (uid)
    pub sub: String,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// e.g. "password", "google.com", "apple.com"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_in_provider: Option<String>,
}

impl Claims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(Self::invalid_sub("sub (uid) cannot be empty"));
        }
        if self.sub.len() > MAX_UID_LENGTH {
            return Err(Self::invalid_sub("sub (uid) exceeds maximum length"));
        }
        // The uid becomes a single path segment of the data root
        if self.sub.contains('/') {
            return Err(Self::invalid_sub("sub (uid) cannot contain '/'"));
        }

        Ok(())
    }

    #[track_caller]
    fn invalid_sub(message: &str) -> AuthError {
        AuthError::InvalidClaim {
            claim: "sub".to_string(),
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
