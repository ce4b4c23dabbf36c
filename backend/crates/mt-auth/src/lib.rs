pub mod caller;
pub mod caller_rate_limiter;
pub mod claims;
pub mod error;
pub mod jwt_algorithm;
pub mod jwt_validator;
pub mod rate_limit_config;

pub use caller::{auth_context_from_claims, authenticate, bearer_token};
pub use caller_rate_limiter::CallerRateLimiter;
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use jwt_algorithm::JwtAlgorithm;
pub use jwt_validator::JwtValidator;
pub use rate_limit_config::RateLimitConfig;

/// Allowed clock skew when checking `exp` and `nbf`, in seconds
pub const CLOCK_SKEW_LEEWAY_SECS: u64 = 30;
