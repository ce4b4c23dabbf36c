//! Document store port

use crate::{Document, DocumentPath, StoreError};

use async_trait::async_trait;

/// Hierarchical document store holding user data
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace a document
    async fn set(&self, document: &Document) -> Result<(), StoreError>;

    /// Fetch a single document
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError>;

    /// Paths of `root` (if present) and all of its descendants, sorted
    async fn list_subtree(&self, root: &DocumentPath) -> Result<Vec<DocumentPath>, StoreError>;

    /// Remove `root` and every document beneath it.
    ///
    /// Not atomic across the subtree: concurrent readers may observe a
    /// partially deleted tree. Transient failures are retried internally;
    /// an error means the subtree may still be partially present. Deleting
    /// an absent subtree succeeds and returns 0.
    async fn recursive_delete(&self, root: &DocumentPath) -> Result<u64, StoreError>;
}
