use crate::{SignInProvider, Uid};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account entry held by the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub uid: Uid,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub provider: SignInProvider,
    pub created_at: DateTime<Utc>,
    pub disabled: bool,
}

impl IdentityRecord {
    pub fn new(uid: Uid, provider: SignInProvider) -> Self {
        Self {
            uid,
            email: None,
            display_name: None,
            provider,
            created_at: Utc::now(),
            disabled: false,
        }
    }
}
