use crate::DbError;

use std::fmt::Display;
use std::time::Duration;

use tokio::time::sleep;

/// Errors that know whether another attempt could succeed
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for DbError {
    fn is_retryable(&self) -> bool {
        DbError::is_retryable(self)
    }
}

/// Exponential backoff for transient store failures.
///
/// The defaults give 3 attempts, starting at 100ms and doubling up to 5s,
/// each delay jittered.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts including the first; `1` disables retries
    pub max_attempts: u32,
    pub initial_delay: Duration,
    /// Upper bound for the un-jittered delay
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Scale each delay by a random factor in [0.5, 1.5)
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Un-jittered delay after the given failed attempt (1-based)
    pub fn backoff(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1) as i32;
        let secs = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Duration::from_secs_f64(secs.min(self.max_delay.as_secs_f64()))
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if !self.jitter {
            return delay;
        }
        delay.mul_f64(0.5 + rand::random::<f64>())
    }
}

/// Run `operation` until it succeeds, fails permanently, or the policy's
/// attempts are used up. The last error is returned unchanged.
pub async fn with_retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display + IsRetryable,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    log::info!("{} recovered on attempt {}", operation_name, attempt);
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        if !error.is_retryable() {
            log::warn!("{} failed permanently: {}", operation_name, error);
            return Err(error);
        }

        if attempt >= max_attempts {
            log::warn!(
                "{} still failing after {} attempts: {}",
                operation_name,
                attempt,
                error
            );
            return Err(error);
        }

        let delay = policy.jittered(policy.backoff(attempt));
        log::debug!(
            "{} attempt {}/{} failed ({}), retrying in {:?}",
            operation_name,
            attempt,
            max_attempts,
            error,
            delay
        );

        sleep(delay).await;
        attempt += 1;
    }
}
