use crate::{CoreError, ErrorLocation, Result as CoreErrorResult};

use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};

/// Path of a document in the hierarchical store.
///
/// Segments alternate `collection/document`, so a valid path always has an
/// even number of non-empty segments, e.g. `users/abc/meals/m1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Parse and validate a full document path
    #[track_caller]
    pub fn parse<S: Into<String>>(value: S) -> CoreErrorResult<Self> {
        let value = value.into();

        if value.is_empty() {
            return Err(Self::invalid(value, "path cannot be empty"));
        }

        let segments: Vec<&str> = value.split('/').collect();

        if segments.iter().any(|s| s.is_empty()) {
            return Err(Self::invalid(value, "path segments cannot be empty"));
        }

        if segments.len() % 2 != 0 {
            return Err(Self::invalid(
                value,
                "path must alternate collection/document segments",
            ));
        }

        Ok(Self(value))
    }

    /// Top-level document `{collection}/{id}`
    #[track_caller]
    pub fn document(collection: &str, id: &str) -> CoreErrorResult<Self> {
        Self::check_segment(collection)?;
        Self::check_segment(id)?;
        Ok(Self(format!("{collection}/{id}")))
    }

    /// Document `{self}/{collection}/{id}` in a subcollection of this one
    #[track_caller]
    pub fn child(&self, collection: &str, id: &str) -> CoreErrorResult<Self> {
        Self::check_segment(collection)?;
        Self::check_segment(id)?;
        Ok(Self(format!("{}/{collection}/{id}", self.0)))
    }

    /// Parent document, or None for a top-level document
    pub fn parent(&self) -> Option<Self> {
        let segments: Vec<&str> = self.0.split('/').collect();
        if segments.len() <= 2 {
            return None;
        }
        Some(Self(segments[..segments.len() - 2].join("/")))
    }

    /// Number of document levels (1 for a top-level document)
    pub fn depth(&self) -> usize {
        self.0.split('/').count() / 2
    }

    /// Document id (last segment)
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    pub fn is_same_or_descendant_of(&self, root: &DocumentPath) -> bool {
        self.0 == root.0
            || (self.0.len() > root.0.len()
                && self.0.starts_with(&root.0)
                && self.0.as_bytes()[root.0.len()] == b'/')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[track_caller]
    fn check_segment(segment: &str) -> CoreErrorResult<()> {
        if segment.is_empty() || segment.contains('/') {
            return Err(Self::invalid(
                segment.to_string(),
                "segment must be non-empty and cannot contain '/'",
            ));
        }
        Ok(())
    }

    #[track_caller]
    fn invalid(value: String, message: &str) -> CoreError {
        CoreError::InvalidDocumentPath {
            value,
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DocumentPath {
    type Error = CoreError;

    fn try_from(value: String) -> CoreErrorResult<Self> {
        Self::parse(value)
    }
}

impl From<DocumentPath> for String {
    fn from(path: DocumentPath) -> Self {
        path.0
    }
}
