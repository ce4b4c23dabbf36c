pub mod account;
pub mod error;
pub mod identity;
pub mod models;
pub mod store;

pub use account::account_deletion_error::AccountDeletionError;
pub use account::account_deletion_service::AccountDeletionService;
pub use account::delete_account_response::DeleteAccountResponse;
pub use error::error_kind::ErrorKind;
pub use error::identity_error::IdentityError;
pub use error::store_error::StoreError;
pub use error::{CoreError, Result};
pub use identity::IdentityProvider;
pub use models::caller_context::{AuthContext, CallerContext};
pub use models::data_layout::DataLayout;
pub use models::document::Document;
pub use models::document_path::DocumentPath;
pub use models::identity_record::IdentityRecord;
pub use models::sign_in_provider::SignInProvider;
pub use models::uid::Uid;
pub use store::DocumentStore;

pub use error_location::ErrorLocation;

/// Default name of the top-level collection holding per-user data roots
pub const DEFAULT_USERS_COLLECTION: &str = "users";

/// Maximum byte length of a uid (matches identity provider limits)
pub const MAX_UID_LENGTH: usize = 128;

#[cfg(test)]
mod tests;
