pub mod account_deletion_error;
pub mod account_deletion_service;
pub mod delete_account_response;
