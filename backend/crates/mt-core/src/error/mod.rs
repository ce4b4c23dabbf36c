pub mod error_kind;
pub mod identity_error;
pub mod store_error;

// -------------------------------------------------------------------------- //

use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid uid '{value}': {message} {location}")]
    InvalidUid {
        value: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid document path '{value}': {message} {location}")]
    InvalidDocumentPath {
        value: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid sign-in provider: {value} {location}")]
    InvalidSignInProvider {
        value: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
