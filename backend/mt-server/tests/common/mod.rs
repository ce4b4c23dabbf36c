#![allow(dead_code)]

//! Test infrastructure for mt-server API tests

use mt_auth::{CallerRateLimiter, Claims, JwtValidator, RateLimitConfig};
use mt_core::{
    AccountDeletionService, DataLayout, Document, DocumentPath, DocumentStore, IdentityProvider,
    IdentityRecord, SignInProvider, Uid,
};
use mt_db::{
    RetryPolicy, SqliteDocumentStore, SqliteIdentityProvider, migrate_identity, migrate_store,
    open_in_memory,
};
use mt_server::{AppState, Metrics};

use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use sqlx::SqlitePool;

pub const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

pub async fn create_store_pool() -> SqlitePool {
    let pool = open_in_memory().await.expect("Failed to create store pool");
    migrate_store(&pool)
        .await
        .expect("Failed to run store migrations");
    pool
}

pub async fn create_identity_pool() -> SqlitePool {
    let pool = open_in_memory()
        .await
        .expect("Failed to create identity pool");
    migrate_identity(&pool)
        .await
        .expect("Failed to run identity migrations");
    pool
}

/// Create AppState for testing with a generous rate limit
pub async fn create_test_app_state() -> AppState {
    create_test_app_state_with_rate_limit(RateLimitConfig {
        max_requests: 100,
        window_secs: 60,
    })
    .await
}

pub async fn create_test_app_state_with_rate_limit(rate_limit: RateLimitConfig) -> AppState {
    let store_pool = create_store_pool().await;
    let identity_pool = create_identity_pool().await;

    let store = SqliteDocumentStore::new(store_pool.clone())
        .with_retry_policy(RetryPolicy::none())
        .with_batch_size(3);
    let identity = SqliteIdentityProvider::new(identity_pool.clone());

    AppState {
        account_deletion: AccountDeletionService::new(
            Arc::new(store),
            Arc::new(identity),
            DataLayout::default(),
        ),
        jwt_validator: Arc::new(JwtValidator::with_hs256(TEST_SECRET)),
        rate_limiter: Arc::new(CallerRateLimiter::new(rate_limit)),
        metrics: Metrics::new(),
        metrics_handle: None,
        store_pool,
        identity_pool,
    }
}

pub fn claims_for(uid: &str) -> Claims {
    let now = chrono::Utc::now().timestamp();
    Claims {
        sub: uid.to_string(),
        exp: now + 3600,
        iat: now,
        iss: None,
        aud: None,
        email: Some(format!("{uid}@example.com")),
        sign_in_provider: Some("password".to_string()),
    }
}

pub fn mint_token(claims: &Claims, secret: &[u8]) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .expect("Failed to mint token")
}

/// Valid ID token for `uid`
pub fn token_for(uid: &str) -> String {
    mint_token(&claims_for(uid), TEST_SECRET)
}

pub fn store(state: &AppState) -> SqliteDocumentStore {
    SqliteDocumentStore::new(state.store_pool.clone())
}

pub fn identity_provider(state: &AppState) -> SqliteIdentityProvider {
    SqliteIdentityProvider::new(state.identity_pool.clone())
}

pub fn uid(value: &str) -> Uid {
    Uid::parse(value).expect("valid test uid")
}

pub fn path(value: &str) -> DocumentPath {
    DocumentPath::parse(value).expect("valid test path")
}

/// Registers `uid` with the identity provider
pub async fn create_identity(state: &AppState, value: &str) {
    let mut record = IdentityRecord::new(uid(value), SignInProvider::Password);
    record.email = Some(format!("{value}@example.com"));
    identity_provider(state)
        .create_user(&record)
        .await
        .expect("Failed to create identity");
}

/// Profile, a couple of meals with items, and a food log
pub async fn seed_user_data(state: &AppState, value: &str) {
    let store = store(state);
    let docs = [
        (format!("users/{value}"), json!({ "displayName": value })),
        (
            format!("users/{value}/profile/main"),
            json!({ "calorieGoal": 2100, "proteinGoal": 150 }),
        ),
        (format!("users/{value}/meals/m1"), json!({ "name": "Breakfast" })),
        (
            format!("users/{value}/meals/m1/items/i1"),
            json!({ "food": "Oats", "grams": 80 }),
        ),
        (
            format!("users/{value}/meals/m1/items/i2"),
            json!({ "food": "Milk", "grams": 250 }),
        ),
        (format!("users/{value}/meals/m2"), json!({ "name": "Lunch" })),
        (
            format!("users/{value}/foodLogs/2026-10-01"),
            json!({ "calories": 1850 }),
        ),
    ];

    for (p, data) in docs {
        store
            .set(&Document::new(path(&p), data))
            .await
            .expect("Failed to seed document");
    }
}

pub async fn subtree_len(state: &AppState, value: &str) -> usize {
    store(state)
        .list_subtree(&path(&format!("users/{value}")))
        .await
        .expect("Failed to list subtree")
        .len()
}

pub async fn identity_exists(state: &AppState, value: &str) -> bool {
    identity_provider(state)
        .get_user(&uid(value))
        .await
        .expect("Failed to read identity")
        .is_some()
}

/// POST /deleteAccount with an optional bearer token and raw body
pub fn delete_account_request(token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/deleteAccount")
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

pub async fn read_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
