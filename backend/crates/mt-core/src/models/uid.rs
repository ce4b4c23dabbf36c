use crate::{CoreError, ErrorLocation, MAX_UID_LENGTH, Result as CoreErrorResult};

use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};

/// Opaque identifier of an identity, shared by the identity provider record
/// and the user's data root. Always a single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uid(String);

impl Uid {
    #[track_caller]
    pub fn parse<S: Into<String>>(value: S) -> CoreErrorResult<Self> {
        let value = value.into();

        let problem = if value.is_empty() {
            Some("uid cannot be empty")
        } else if value.len() > MAX_UID_LENGTH {
            Some("uid exceeds maximum length")
        } else if value.contains('/') {
            Some("uid cannot contain '/'")
        } else {
            None
        };

        match problem {
            Some(message) => Err(CoreError::InvalidUid {
                value,
                message: message.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(Self(value)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Uid {
    type Error = CoreError;

    fn try_from(value: String) -> CoreErrorResult<Self> {
        Self::parse(value)
    }
}

impl From<Uid> for String {
    fn from(uid: Uid) -> Self {
        uid.0
    }
}
