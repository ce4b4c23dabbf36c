use mt_core::{ErrorKind, ErrorLocation, IdentityError, StoreError};

use std::panic::Location;

use thiserror::Error;

// SQLite primary result codes (extended codes keep these in the low byte)
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Stored row could not be decoded: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    #[track_caller]
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Busy/locked databases, pool exhaustion and I/O hiccups are transient
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Sqlx { source, .. } => match source {
                sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::WorkerCrashed => {
                    true
                }
                sqlx::Error::Database(db_err) => db_err
                    .code()
                    .and_then(|code| code.parse::<i32>().ok())
                    .map(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
                    .unwrap_or(false),
                _ => false,
            },
            _ => false,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Sqlx {
                source: sqlx::Error::Database(db_err),
                ..
            } => db_err.is_unique_violation(),
            _ => false,
        }
    }

    /// Collaborator-facing kind for this failure
    pub fn kind(&self) -> ErrorKind {
        if self.is_retryable() {
            ErrorKind::Unavailable
        } else if self.is_unique_violation() {
            ErrorKind::AlreadyExists
        } else {
            ErrorKind::Internal
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    #[track_caller]
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        Self::Migration {
            message: format!("Migration failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert database errors to document store errors
impl From<DbError> for StoreError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        log::error!("Document store database error: {}", e);
        StoreError::Operation {
            kind: e.kind(),
            message: client_message(&e),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert database errors to identity provider errors
impl From<DbError> for IdentityError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        log::error!("Identity database error: {}", e);
        IdentityError::Operation {
            kind: e.kind(),
            message: client_message(&e),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

// Don't expose internal database details to clients
fn client_message(e: &DbError) -> String {
    match e.kind() {
        ErrorKind::Unavailable => "Database temporarily unavailable".to_string(),
        ErrorKind::AlreadyExists => "Record already exists".to_string(),
        _ => "Database operation failed".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
