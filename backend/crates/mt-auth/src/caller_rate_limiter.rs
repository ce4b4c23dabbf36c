use crate::{AuthError, RateLimitConfig, Result as AuthErrorResult};

use mt_core::Uid;

use std::num::NonZeroU32;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

/// Keyed rate limiter with one bucket per uid.
///
/// A caller may burst up to `max_requests` at once; the bucket then refills
/// evenly across `window_secs`.
pub struct CallerRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    config: RateLimitConfig,
}

impl CallerRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
        let period = Duration::from_secs(config.window_secs.max(1)) / burst.get();

        let quota = Quota::with_period(period)
            .map(|q| q.allow_burst(burst))
            .unwrap_or_else(|| Quota::per_second(burst));

        Self {
            limiter: RateLimiter::keyed(quota),
            config,
        }
    }

    /// Check if the caller may proceed, returns error if rate limited
    #[track_caller]
    pub fn check(&self, uid: &Uid) -> AuthErrorResult<()> {
        self.limiter
            .check_key(&uid.as_str().to_string())
            .map_err(|_| AuthError::RateLimitExceeded {
                limit: self.config.max_requests,
                window_secs: self.config.window_secs,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Drop buckets that have fully refilled
    pub fn prune(&self) {
        self.limiter.retain_recent();
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}

impl Default for CallerRateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
