pub mod api;
pub mod app_state;
pub mod bootstrap;
pub mod error;
pub mod health;
pub mod logger;
pub mod metrics;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    account::{
        callable_request::CallableRequest, callable_response::CallableResponse,
        delete_account::delete_account,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::caller::Caller,
};
pub use app_state::AppState;
pub use metrics::Metrics;

pub use crate::routes::build_router;
