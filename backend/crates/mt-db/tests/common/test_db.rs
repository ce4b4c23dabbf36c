use mt_core::{Document, DocumentPath, DocumentStore, IdentityRecord, SignInProvider, Uid};
use mt_db::{SqliteDocumentStore, SqliteIdentityProvider, migrate_identity, migrate_store, open_in_memory};

use serde_json::json;
use sqlx::SqlitePool;

/// In-memory document store pool with migrations applied
pub async fn create_store_pool() -> SqlitePool {
    let pool = open_in_memory().await.expect("Failed to create test pool");
    migrate_store(&pool)
        .await
        .expect("Failed to run store migrations");
    pool
}

/// In-memory identity pool with migrations applied
pub async fn create_identity_pool() -> SqlitePool {
    let pool = open_in_memory().await.expect("Failed to create test pool");
    migrate_identity(&pool)
        .await
        .expect("Failed to run identity migrations");
    pool
}

pub async fn create_test_store() -> SqliteDocumentStore {
    SqliteDocumentStore::new(create_store_pool().await)
}

pub async fn create_test_identity_provider() -> SqliteIdentityProvider {
    SqliteIdentityProvider::new(create_identity_pool().await)
}

pub fn path(value: &str) -> DocumentPath {
    DocumentPath::parse(value).expect("valid test path")
}

pub fn uid(value: &str) -> Uid {
    Uid::parse(value).expect("valid test uid")
}

pub fn create_test_identity(value: &str) -> IdentityRecord {
    let mut record = IdentityRecord::new(uid(value), SignInProvider::Password);
    record.email = Some(format!("{value}@example.com"));
    record
}

/// Writes a small document at each of `paths`
pub async fn seed(store: &SqliteDocumentStore, paths: &[&str]) {
    for p in paths {
        store
            .set(&Document::new(path(p), json!({ "seeded": p })))
            .await
            .expect("Failed to seed document");
    }
}

/// Profile, meals, nested items and food logs for one user
pub async fn seed_user_tree(store: &SqliteDocumentStore, uid: &str) {
    let paths = [
        format!("users/{uid}"),
        format!("users/{uid}/profile/main"),
        format!("users/{uid}/meals/m1"),
        format!("users/{uid}/meals/m1/items/i1"),
        format!("users/{uid}/meals/m1/items/i2"),
        format!("users/{uid}/meals/m2"),
        format!("users/{uid}/foodLogs/2026-10-01"),
    ];
    let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
    seed(store, &refs).await;
}
