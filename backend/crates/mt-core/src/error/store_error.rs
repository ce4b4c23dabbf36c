use crate::{ErrorKind, ErrorLocation};

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document store {kind}: {message} {location}")]
    Operation {
        kind: ErrorKind,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid document path '{path}': {message} {location}")]
    InvalidPath {
        path: String,
        message: String,
        location: ErrorLocation,
    },
}

impl StoreError {
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
            Self::Operation { kind, .. } => *kind,
            Self::InvalidPath { .. } => ErrorKind::InvalidArgument,
        }
    }

    /// Message without the source location, safe to hand to clients
    pub fn message(&self) -> &str {
        match self {
            Self::Operation { message, .. } | Self::InvalidPath { message, .. } => message,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}
