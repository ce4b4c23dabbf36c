pub mod sqlite_document_store;
pub mod sqlite_identity_provider;
