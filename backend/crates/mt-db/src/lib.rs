pub mod connection;
pub mod error;
pub mod repositories;
pub mod retry;

pub use connection::{migrate_identity, migrate_store, open_in_memory, open_pool};
pub use error::{DbError, Result};
pub use repositories::sqlite_document_store::SqliteDocumentStore;
pub use repositories::sqlite_identity_provider::SqliteIdentityProvider;
pub use retry::{IsRetryable, RetryPolicy, with_retry};

/// Documents removed per statement during a recursive delete
pub const DEFAULT_DELETE_BATCH_SIZE: u32 = 500;
