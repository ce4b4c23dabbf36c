pub mod callable_request;
pub mod callable_response;
pub mod delete_account;
