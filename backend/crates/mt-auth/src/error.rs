use error_location::ErrorLocation;
use thiserror::Error;

const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Rate limit exceeded: {limit} requests per {window_secs}s {location}")]
    RateLimitExceeded {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Callable status reported to the client
    pub fn status(&self) -> &'static str {
        match self {
            Self::RateLimitExceeded { .. } => RESOURCE_EXHAUSTED,
            _ => UNAUTHENTICATED,
        }
    }

    /// Short description without internals or source location
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidToken { .. } | Self::JwtDecode { .. } => {
                "The provided ID token is invalid.".to_string()
            }
            Self::TokenExpired { .. } => "The provided ID token has expired.".to_string(),
            Self::MissingHeader { .. } => {
                "The function must be called while authenticated.".to_string()
            }
            Self::InvalidScheme { .. } => {
                "Authorization header must use the Bearer scheme.".to_string()
            }
            Self::RateLimitExceeded {
                limit, window_secs, ..
            } => format!(
                "Too many requests: at most {} per {}s.",
                limit, window_secs
            ),
            Self::InvalidClaim { claim, message, .. } => {
                format!("Invalid claim '{}': {}", claim, message)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
