use serde::Deserialize;
use serde_json::Value;

/// Callable request envelope: `{"data": ...}`.
/// The payload is accepted but never used to pick the target account.
#[derive(Debug, Deserialize)]
pub struct CallableRequest {
    pub data: Value,
}
