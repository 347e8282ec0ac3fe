//! Provider key validation outcome.

use serde::Serialize;

/// Result of probing a provider with a user-supplied key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyCheck {
    pub valid: bool,
    pub message: String,
    pub latency_ms: u64,
}

impl KeyCheck {
    /// Map a model-listing response status to a verdict.
    ///
    /// 429 counts as valid: the provider recognised the key and is only
    /// throttling it.
    #[must_use]
    pub fn from_status(status: u16, latency_ms: u64) -> Self {
        let (valid, message) = match status {
            200..=299 => (true, "API key is valid".to_string()),
            401 | 403 => (false, format!("API key rejected (HTTP {status})")),
            429 => (true, "API key is valid but currently rate limited".to_string()),
            other => (false, format!("Unexpected response from provider (HTTP {other})")),
        };
        Self {
            valid,
            message,
            latency_ms,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            valid: false,
            message: message.into(),
            latency_ms,
        }
    }
}
