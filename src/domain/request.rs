//! Per-cycle analysis input.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::market::{Market, OpenPosition, TradeHistory};

/// Everything the caller knows at the start of a cycle.
///
/// Built fresh per cycle. The optional `api_key` is the user's own provider
/// key; it is forwarded to the proxy inside the request body and is never
/// serialized back out or shown by `Debug`.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub markets: Vec<Market>,
    #[serde(default)]
    pub open_positions: Vec<OpenPosition>,
    pub bankroll: f64,
    #[serde(default)]
    pub history: Option<TradeHistory>,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl AnalysisRequest {
    pub fn new(markets: Vec<Market>, bankroll: f64) -> Self {
        Self {
            markets,
            bankroll,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_positions(mut self, positions: Vec<OpenPosition>) -> Self {
        self.open_positions = positions;
        self
    }

    #[must_use]
    pub fn with_history(mut self, history: TradeHistory) -> Self {
        self.history = Some(history);
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

impl fmt::Debug for AnalysisRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisRequest")
            .field("markets", &self.markets.len())
            .field("open_positions", &self.open_positions.len())
            .field("bankroll", &self.bankroll)
            .field("history", &self.history.is_some())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let request = AnalysisRequest::new(vec![], 100.0).with_api_key("sk-live-secret");
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("sk-live-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn api_key_is_read_but_never_written() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"markets":[],"bankroll":5,"apiKey":"k"}"#).unwrap();
        assert_eq!(request.api_key.as_deref(), Some("k"));
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("apiKey"));
    }
}
