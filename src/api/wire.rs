//! Response envelopes that never leave the API layer.

use serde::Deserialize;

/// Error body the backend sends alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    /// Extract `msg` from a raw body, tolerating non-JSON bodies.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|b| b.msg)
            .filter(|m| !m.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeolocationResponse {
    pub allowed: bool,
}
