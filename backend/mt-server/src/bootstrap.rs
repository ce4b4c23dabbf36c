//! Wiring from configuration to runtime components

use crate::error::Result as ServerErrorResult;

use mt_auth::{CallerRateLimiter, JwtValidator, RateLimitConfig};
use mt_config::{Config, RetryConfig};
use mt_core::{AccountDeletionService, DataLayout};
use mt_db::{RetryPolicy, SqliteDocumentStore, SqliteIdentityProvider};

use std::sync::Arc;
use std::time::Duration;

use log::info;
use sqlx::SqlitePool;

/// Build the ID token validator from the auth section.
/// `validate()` guarantees a secret or a readable key path.
pub fn build_jwt_validator(config: &Config) -> ServerErrorResult<JwtValidator> {
    let validator = if let Some(ref secret) = config.auth.jwt_secret {
        info!("JWT: HS256 verification enabled");
        JwtValidator::with_hs256(secret.as_bytes())
    } else {
        let public_key = config.read_public_key()?.unwrap_or_default();
        info!("JWT: RS256 verification enabled");
        JwtValidator::with_rs256(&public_key)?
    };

    let validator = match config.auth.issuer {
        Some(ref issuer) => validator.with_issuer(issuer),
        None => validator,
    };

    Ok(match config.auth.audience {
        Some(ref audience) => validator.with_audience(audience),
        None => validator,
    })
}

pub fn retry_policy(config: &RetryConfig) -> RetryPolicy {
    RetryPolicy {
        max_attempts: config.max_attempts,
        initial_delay: Duration::from_millis(config.initial_delay_ms),
        max_delay: Duration::from_secs(config.max_delay_secs),
        backoff_multiplier: config.backoff_multiplier,
        jitter: config.jitter,
    }
}

pub fn rate_limiter(config: &Config) -> CallerRateLimiter {
    CallerRateLimiter::new(RateLimitConfig {
        max_requests: config.rate_limit.max_requests,
        window_secs: config.rate_limit.window_secs,
    })
}

/// SQLite-backed deletion service over already-migrated pools
pub fn account_deletion_service(
    config: &Config,
    store_pool: SqlitePool,
    identity_pool: SqlitePool,
) -> AccountDeletionService {
    let store = SqliteDocumentStore::new(store_pool)
        .with_retry_policy(retry_policy(&config.retry))
        .with_batch_size(config.store.delete_batch_size);
    let identity = SqliteIdentityProvider::new(identity_pool);

    AccountDeletionService::new(
        Arc::new(store),
        Arc::new(identity),
        DataLayout::new(config.store.users_collection.clone()),
    )
}
