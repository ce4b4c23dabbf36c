use crate::{DEFAULT_DELETE_BATCH_SIZE, DbError, Result as DbErrorResult, RetryPolicy, with_retry};

use mt_core::{Document, DocumentPath, DocumentStore, StoreError};

use async_trait::async_trait;
use chrono::DateTime;
use sqlx::SqlitePool;

/// Document store backed by a single SQLite table.
///
/// A subtree is selected as a key range: the root itself plus every path in
/// `(root + "/", root + "0")`. `'0'` is the code point right after `'/'`, so
/// `users/abc2/...` never falls inside the range of `users/abc`.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
    retry: RetryPolicy,
    batch_size: u32,
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            retry: RetryPolicy::default(),
            batch_size: DEFAULT_DELETE_BATCH_SIZE,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn subtree_bounds(root: &DocumentPath) -> (String, String) {
        (format!("{}/", root.as_str()), format!("{}0", root.as_str()))
    }

    async fn upsert(&self, document: &Document) -> DbErrorResult<()> {
        let data = serde_json::to_string(&document.data)
            .map_err(|e| DbError::decode(format!("Document body is not serializable: {}", e)))?;
        let parent_path = document.path.parent().map(String::from);
        let depth = document.path.depth() as i64;
        let updated_at = document.updated_at.timestamp_millis();

        sqlx::query(
            r#"
              INSERT INTO documents (path, parent_path, depth, data, updated_at)
              VALUES (?, ?, ?, ?, ?)
              ON CONFLICT(path) DO UPDATE SET
                  data = excluded.data,
                  updated_at = excluded.updated_at
              "#,
        )
        .bind(document.path.as_str())
        .bind(parent_path)
        .bind(depth)
        .bind(data)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, path: &DocumentPath) -> DbErrorResult<Option<Document>> {
        let row: Option<(String, i64)> =
            sqlx::query_as("SELECT data, updated_at FROM documents WHERE path = ?")
                .bind(path.as_str())
                .fetch_optional(&self.pool)
                .await?;

        let Some((data, updated_at)) = row else {
            return Ok(None);
        };

        let data = serde_json::from_str(&data)
            .map_err(|e| DbError::decode(format!("Invalid JSON at {}: {}", path, e)))?;
        let updated_at = DateTime::from_timestamp_millis(updated_at)
            .ok_or_else(|| DbError::decode(format!("Invalid timestamp at {}", path)))?;

        Ok(Some(Document {
            path: path.clone(),
            data,
            updated_at,
        }))
    }

    async fn subtree_paths(&self, root: &DocumentPath) -> DbErrorResult<Vec<DocumentPath>> {
        let (lower, upper) = Self::subtree_bounds(root);

        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
              SELECT path FROM documents
              WHERE path = ? OR (path > ? AND path < ?)
              ORDER BY path ASC
              "#,
        )
        .bind(root.as_str())
        .bind(&lower)
        .bind(&upper)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(path,)| {
                DocumentPath::parse(path).map_err(|e| DbError::decode(e.to_string()))
            })
            .collect()
    }

    /// Remove up to `batch_size` documents of the subtree, deepest first
    async fn delete_batch(
        &self,
        root: &DocumentPath,
        lower: &str,
        upper: &str,
    ) -> DbErrorResult<u64> {
        let result = sqlx::query(
            r#"
              DELETE FROM documents
              WHERE path IN (
                  SELECT path FROM documents
                  WHERE path = ? OR (path > ? AND path < ?)
                  ORDER BY depth DESC, path ASC
                  LIMIT ?
              )
              "#,
        )
        .bind(root.as_str())
        .bind(lower)
        .bind(upper)
        .bind(self.batch_size as i64)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn set(&self, document: &Document) -> Result<(), StoreError> {
        with_retry(&self.retry, "document set", || self.upsert(document)).await?;
        Ok(())
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
        Ok(with_retry(&self.retry, "document get", || self.find(path)).await?)
    }

    async fn list_subtree(&self, root: &DocumentPath) -> Result<Vec<DocumentPath>, StoreError> {
        Ok(with_retry(&self.retry, "subtree listing", || self.subtree_paths(root)).await?)
    }

    async fn recursive_delete(&self, root: &DocumentPath) -> Result<u64, StoreError> {
        let (lower, upper) = Self::subtree_bounds(root);
        let mut removed: u64 = 0;

        loop {
            let deleted = with_retry(&self.retry, "recursive delete batch", || {
                self.delete_batch(root, &lower, &upper)
            })
            .await?;

            removed += deleted;
            log::debug!("Recursive delete of {}: batch removed {}", root, deleted);

            if deleted < self.batch_size as u64 {
                break;
            }
        }

        Ok(removed)
    }
}
