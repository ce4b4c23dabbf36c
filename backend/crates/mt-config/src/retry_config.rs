use crate::{ConfigError, ConfigErrorResult};
use crate::error::ensure_in_range;

use std::ops::RangeInclusive;

use serde::Deserialize;

const ATTEMPTS_RANGE: RangeInclusive<u32> = 1..=10;
const INITIAL_DELAY_MS_RANGE: RangeInclusive<u64> = 10..=10_000;
const MAX_DELAY_SECS_RANGE: RangeInclusive<u64> = 1..=60;
const MULTIPLIER_RANGE: RangeInclusive<f64> = 1.0..=10.0;

/// Backoff for transient document store failures during deletion.
///
/// Each delete batch is retried on its own; `max_attempts` counts the
/// first try, so `1` disables retries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    /// Cap applied after each multiplication
    pub max_delay_secs: u64,
    pub backoff_multiplier: f64,
    /// Scale each delay by a random factor in [0.5, 1.5)
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 100,
            max_delay_secs: 5,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        ensure_in_range(
            "Config",
            "retry.max_attempts",
            self.max_attempts,
            ATTEMPTS_RANGE,
        )?;
        ensure_in_range(
            "Config",
            "retry.initial_delay_ms",
            self.initial_delay_ms,
            INITIAL_DELAY_MS_RANGE,
        )?;
        ensure_in_range(
            "Config",
            "retry.max_delay_secs",
            self.max_delay_secs,
            MAX_DELAY_SECS_RANGE,
        )?;
        ensure_in_range(
            "Config",
            "retry.backoff_multiplier",
            self.backoff_multiplier,
            MULTIPLIER_RANGE,
        )?;

        if self.initial_delay_ms > self.max_delay_secs * 1000 {
            return Err(ConfigError::config(format!(
                "retry.initial_delay_ms ({}) exceeds retry.max_delay_secs ({}s)",
                self.initial_delay_ms, self.max_delay_secs
            )));
        }

        Ok(())
    }
}
