use crate::DocumentPath;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored document: a JSON body addressed by its path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub path: DocumentPath,
    pub data: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(path: DocumentPath, data: serde_json::Value) -> Self {
        Self {
            path,
            data,
            updated_at: Utc::now(),
        }
    }
}
