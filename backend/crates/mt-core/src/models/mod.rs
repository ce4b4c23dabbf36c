pub mod caller_context;
pub mod data_layout;
pub mod document;
pub mod document_path;
pub mod identity_record;
pub mod sign_in_provider;
pub mod uid;
