use crate::{ErrorLocation, IdentityError, StoreError};

use std::panic::Location;

use thiserror::Error;

pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";

pub const STAGE_STORE: &str = "store";
pub const STAGE_IDENTITY: &str = "identity";

#[derive(Error, Debug)]
pub enum AccountDeletionError {
    /// No verified caller identity; nothing was touched
    #[error("Unauthenticated: {message} {location}")]
    Unauthenticated {
        message: String,
        location: ErrorLocation,
    },

    /// Data deletion failed; the identity record is left intact
    #[error("Data deletion failed: {source} {location}")]
    StoreFailure {
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    /// Identity deletion failed after the data was already removed
    #[error("Identity deletion failed: {source} {location}")]
    IdentityProviderFailure {
        #[source]
        source: IdentityError,
        location: ErrorLocation,
    },
}

impl AccountDeletionError {
    #[track_caller]
    pub fn unauthenticated<S: Into<String>>(message: S) -> Self {
        Self::Unauthenticated {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Machine-readable kind; collaborator kinds pass through unchanged
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated { .. } => UNAUTHENTICATED,
            Self::StoreFailure { source, .. } => source.kind().as_str(),
            Self::IdentityProviderFailure { source, .. } => source.kind().as_str(),
        }
    }

    /// Which step of the deletion failed
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            Self::Unauthenticated { .. } => None,
            Self::StoreFailure { .. } => Some(STAGE_STORE),
            Self::IdentityProviderFailure { .. } => Some(STAGE_IDENTITY),
        }
    }

    /// Human-readable message without source locations
    pub fn message(&self) -> String {
        match self {
            Self::Unauthenticated { message, .. } => message.clone(),
            Self::StoreFailure { source, .. } => source.message().to_string(),
            Self::IdentityProviderFailure { source, .. } => source.message(),
        }
    }
}
