use crate::{DbError, Result as DbErrorResult};

use mt_core::{IdentityError, IdentityProvider, IdentityRecord, SignInProvider, Uid};

use std::str::FromStr;

use async_trait::async_trait;
use chrono::DateTime;
use sqlx::SqlitePool;

type IdentityRow = (String, Option<String>, Option<String>, String, i64, bool);

/// Identity records kept in their own SQLite database
#[derive(Clone)]
pub struct SqliteIdentityProvider {
    pool: SqlitePool,
}

impl SqliteIdentityProvider {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn row_to_record(row: IdentityRow) -> DbErrorResult<IdentityRecord> {
        let (uid, email, display_name, provider, created_at, disabled) = row;

        let uid = Uid::parse(uid).map_err(|e| DbError::decode(e.to_string()))?;
        let provider =
            SignInProvider::from_str(&provider).map_err(|e| DbError::decode(e.to_string()))?;
        let created_at = DateTime::from_timestamp_millis(created_at)
            .ok_or_else(|| DbError::decode(format!("Invalid created_at for {}", uid)))?;

        Ok(IdentityRecord {
            uid,
            email,
            display_name,
            provider,
            created_at,
            disabled,
        })
    }
}

#[async_trait]
impl IdentityProvider for SqliteIdentityProvider {
    async fn create_user(&self, record: &IdentityRecord) -> Result<(), IdentityError> {
        sqlx::query(
            r#"
              INSERT INTO identities (uid, email, display_name, provider, created_at, disabled)
              VALUES (?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(record.uid.as_str())
        .bind(&record.email)
        .bind(&record.display_name)
        .bind(record.provider.as_str())
        .bind(record.created_at.timestamp_millis())
        .bind(record.disabled)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        log::debug!("Created identity {}", record.uid);
        Ok(())
    }

    async fn get_user(&self, uid: &Uid) -> Result<Option<IdentityRecord>, IdentityError> {
        let row: Option<IdentityRow> = sqlx::query_as(
            r#"
              SELECT uid, email, display_name, provider, created_at, disabled
              FROM identities
              WHERE uid = ?
              "#,
        )
        .bind(uid.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(row.map(Self::row_to_record).transpose()?)
    }

    async fn delete_user(&self, uid: &Uid) -> Result<(), IdentityError> {
        let result = sqlx::query("DELETE FROM identities WHERE uid = ?")
            .bind(uid.as_str())
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::user_not_found(uid.as_str()));
        }

        log::debug!("Deleted identity {}", uid);
        Ok(())
    }
}
