use crate::{DEFAULT_USERS_COLLECTION, DocumentPath, Result as CoreErrorResult, Uid};

/// Where each identity's data lives in the document store
#[derive(Debug, Clone)]
pub struct DataLayout {
    users_collection: String,
}

impl DataLayout {
    pub fn new<S: Into<String>>(users_collection: S) -> Self {
        Self {
            users_collection: users_collection.into(),
        }
    }

    pub fn users_collection(&self) -> &str {
        &self.users_collection
    }

    /// Data root for `uid`: `{users_collection}/{uid}`
    #[track_caller]
    pub fn root_for(&self, uid: &Uid) -> CoreErrorResult<DocumentPath> {
        DocumentPath::document(&self.users_collection, uid.as_str())
    }
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::new(DEFAULT_USERS_COLLECTION)
    }
}
