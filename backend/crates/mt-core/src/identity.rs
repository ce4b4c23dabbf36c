//! Identity provider port

use crate::{IdentityError, IdentityRecord, Uid};

use async_trait::async_trait;

/// System of record for identities, separate from application data
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new identity; fails with `ALREADY_EXISTS` on a duplicate uid
    async fn create_user(&self, record: &IdentityRecord) -> Result<(), IdentityError>;

    async fn get_user(&self, uid: &Uid) -> Result<Option<IdentityRecord>, IdentityError>;

    /// Remove the identity; `IdentityError::UserNotFound` when absent
    async fn delete_user(&self, uid: &Uid) -> Result<(), IdentityError>;
}
