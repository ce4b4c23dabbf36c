use serde::Serialize;

/// Acknowledgment returned by a completed account deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteAccountResponse {
    /// Always `true` when present
    pub ok: bool,
}

impl DeleteAccountResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
