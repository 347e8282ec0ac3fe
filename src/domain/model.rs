//! Static model metadata.

use serde::Serialize;

use super::provider::ProviderId;

/// Pacing class for rate/cost-limited free-tier models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeTier {
    /// Token budget per minute advertised by the provider.
    pub tokens_per_minute: u32,
    /// Minimum wall-clock spacing between two calls, in milliseconds.
    pub min_interval_ms: u64,
}

/// Pricing and capability metadata for one (provider, model) pair.
///
/// Descriptors live in the static catalog and are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub provider: ProviderId,
    pub id: &'static str,
    pub name: &'static str,
    /// USD per million input tokens.
    pub input_price: f64,
    /// USD per million output tokens.
    pub output_price: f64,
    pub max_output_tokens: u32,
    pub context_window: u32,
    pub has_web_search: bool,
    /// Reasoning-class models reject a sampling temperature.
    pub reasoning: bool,
    pub free_tier: Option<FreeTier>,
}

impl ModelDescriptor {
    /// Rate-limiter key, `"provider:model"`.
    #[must_use]
    pub fn rate_key(&self) -> String {
        format!("{}:{}", self.provider, self.id)
    }

    /// Minimum call spacing, if this model is paced.
    #[must_use]
    pub fn min_interval_ms(&self) -> Option<u64> {
        self.free_tier.map(|t| t.min_interval_ms)
    }

    /// Output cap honoring the caller, the model and the provider ceiling.
    #[must_use]
    pub fn clamp_output_tokens(&self, requested: u32) -> u32 {
        requested
            .min(self.max_output_tokens)
            .min(self.provider.output_ceiling())
    }
}
