//! Usage records and caller-side running totals.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::provider::ProviderId;

/// Token and cost accounting for a single call.
///
/// Written once by the cost accountant and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_usd: f64,
    pub provider: ProviderId,
    pub model: String,
    pub timestamp: DateTime<Utc>,
    pub web_searches: u32,
    pub search_queries: Vec<String>,
}

impl Usage {
    /// Usage for a call that never reached the network.
    pub fn zero(provider: ProviderId, model: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            input_tokens: 0,
            output_tokens: 0,
            cost_usd: 0.0,
            provider,
            model: model.into(),
            timestamp,
            web_searches: 0,
            search_queries: Vec::new(),
        }
    }
}

/// Running totals across calls, kept by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLedger {
    pub calls: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_usd: f64,
    pub web_searches: u64,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one call's usage into the totals.
    pub fn record(&mut self, usage: &Usage) {
        self.calls += 1;
        self.input_tokens = self.input_tokens.saturating_add(usage.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(usage.output_tokens);
        self.cost_usd += usage.cost_usd;
        self.web_searches += u64::from(usage.web_searches);
    }

    /// Mean spend per call, 0 before any call.
    #[must_use]
    pub fn average_cost(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.cost_usd / self.calls as f64
        }
    }
}
