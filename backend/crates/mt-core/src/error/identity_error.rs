use crate::{ErrorKind, ErrorLocation};

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("No identity record for uid '{uid}' {location}")]
    UserNotFound {
        uid: String,
        location: ErrorLocation,
    },

    #[error("Identity provider {kind}: {message} {location}")]
    Operation {
        kind: ErrorKind,
        message: String,
        location: ErrorLocation,
    },
}

impl IdentityError {
    #[track_caller]
    pub fn user_not_found<S: Into<String>>(uid: S) -> Self {
        Self::UserNotFound {
            uid: uid.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn operation<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self::Operation {
            kind,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound { .. } => ErrorKind::NotFound,
            Self::Operation { kind, .. } => *kind,
        }
    }

    /// Message without the source location, safe to hand to clients
    pub fn message(&self) -> String {
        match self {
            Self::UserNotFound { uid, .. } => format!("No identity record for uid '{uid}'"),
            Self::Operation { message, .. } => message.clone(),
        }
    }
}
