use crate::ConfigErrorResult;
use crate::error::ensure_in_range;

use std::ops::RangeInclusive;

use serde::Deserialize;

const REQUESTS_RANGE: RangeInclusive<u32> = 1..=1000;
const WINDOW_SECS_RANGE: RangeInclusive<u64> = 1..=3600;

/// Per-caller request limit for the deleteAccount callable (default 5 per minute)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window_secs: 60,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        ensure_in_range(
            "Config",
            "rate_limit.max_requests",
            self.max_requests,
            REQUESTS_RANGE,
        )?;
        ensure_in_range(
            "Config",
            "rate_limit.window_secs",
            self.window_secs,
            WINDOW_SECS_RANGE,
        )
    }
}
