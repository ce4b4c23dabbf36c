use crate::error::ensure_in_range;
use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DELETE_BATCH_SIZE, DEFAULT_USERS_COLLECTION,
    DELETE_BATCH_SIZE_RANGE,
};

use serde::Deserialize;

/// Layout of user data in the document store
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Top-level collection holding one root document per uid
    pub users_collection: String,
    /// Documents removed per statement during recursive deletion
    pub delete_batch_size: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            users_collection: String::from(DEFAULT_USERS_COLLECTION),
            delete_batch_size: DEFAULT_DELETE_BATCH_SIZE,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.users_collection.is_empty() || self.users_collection.contains('/') {
            return Err(ConfigError::store(format!(
                "store.users_collection must be a single non-empty segment, got '{}'",
                self.users_collection
            )));
        }

        ensure_in_range(
            "Store",
            "store.delete_batch_size",
            self.delete_batch_size,
            DELETE_BATCH_SIZE_RANGE,
        )
    }
}
