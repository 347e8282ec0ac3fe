//! Static registry of provider/model metadata.
//!
//! Pure lookups over a compile-time table. Prices are USD per million tokens.

use crate::domain::{FreeTier, ModelDescriptor, ProviderId};
use crate::error::{ConfigError, Result};

const fn model(
    provider: ProviderId,
    id: &'static str,
    name: &'static str,
    input_price: f64,
    output_price: f64,
    max_output_tokens: u32,
    context_window: u32,
    has_web_search: bool,
) -> ModelDescriptor {
    ModelDescriptor {
        provider,
        id,
        name,
        input_price,
        output_price,
        max_output_tokens,
        context_window,
        has_web_search,
        reasoning: false,
        free_tier: None,
    }
}

const fn reasoning(mut descriptor: ModelDescriptor) -> ModelDescriptor {
    descriptor.reasoning = true;
    descriptor
}

const fn free_tier(
    mut descriptor: ModelDescriptor,
    tokens_per_minute: u32,
    min_interval_ms: u64,
) -> ModelDescriptor {
    descriptor.free_tier = Some(FreeTier {
        tokens_per_minute,
        min_interval_ms,
    });
    descriptor
}

use ProviderId::{Anthropic, DeepSeek, Gemini, Groq, OpenAi, Xai};

static MODELS: &[ModelDescriptor] = &[
    // Anthropic
    model(Anthropic, "claude-sonnet-4-5", "Claude Sonnet 4.5", 3.0, 15.0, 64_000, 200_000, true),
    model(Anthropic, "claude-haiku-4-5", "Claude Haiku 4.5", 1.0, 5.0, 64_000, 200_000, true),
    model(Anthropic, "claude-opus-4-1", "Claude Opus 4.1", 15.0, 75.0, 32_000, 200_000, true),
    // OpenAI
    model(OpenAi, "gpt-4o", "GPT-4o", 2.5, 10.0, 16_384, 128_000, false),
    model(OpenAi, "gpt-4o-search-preview", "GPT-4o Search", 2.5, 10.0, 16_384, 128_000, true),
    model(OpenAi, "gpt-4.1-mini", "GPT-4.1 mini", 0.4, 1.6, 32_768, 1_047_576, false),
    reasoning(model(OpenAi, "o4-mini", "o4-mini", 1.1, 4.4, 100_000, 200_000, false)),
    // Google
    free_tier(
        model(Gemini, "gemini-2.5-flash", "Gemini 2.5 Flash", 0.3, 2.5, 65_536, 1_048_576, true),
        250_000,
        6_000,
    ),
    free_tier(
        model(Gemini, "gemini-2.5-pro", "Gemini 2.5 Pro", 1.25, 10.0, 65_536, 1_048_576, true),
        125_000,
        12_000,
    ),
    free_tier(
        model(Gemini, "gemini-2.0-flash", "Gemini 2.0 Flash", 0.1, 0.4, 8_192, 1_048_576, true),
        1_000_000,
        4_000,
    ),
    // xAI
    reasoning(model(Xai, "grok-4", "Grok 4", 3.0, 15.0, 64_000, 256_000, false)),
    model(Xai, "grok-3-mini", "Grok 3 mini", 0.3, 0.5, 16_384, 131_072, false),
    // Groq
    free_tier(
        model(Groq, "llama-3.3-70b-versatile", "Llama 3.3 70B", 0.59, 0.79, 32_768, 131_072, false),
        12_000,
        5_000,
    ),
    // DeepSeek
    model(DeepSeek, "deepseek-chat", "DeepSeek V3", 0.27, 1.1, 8_192, 65_536, false),
    reasoning(model(DeepSeek, "deepseek-reasoner", "DeepSeek R1", 0.55, 2.19, 65_536, 65_536, false)),
];

/// Look up a model by provider and id.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownModel`] when the pair is not in the catalog.
pub fn get_model(provider: ProviderId, model_id: &str) -> Result<&'static ModelDescriptor> {
    MODELS
        .iter()
        .find(|m| m.provider == provider && m.id == model_id)
        .ok_or_else(|| {
            ConfigError::UnknownModel {
                provider,
                model: model_id.to_string(),
            }
            .into()
        })
}

/// All catalog entries for `provider`.
pub fn models_for(provider: ProviderId) -> impl Iterator<Item = &'static ModelDescriptor> {
    MODELS.iter().filter(move |m| m.provider == provider)
}

/// Every catalog entry.
pub fn all_models() -> &'static [ModelDescriptor] {
    MODELS
}

/// USD cost of a call with the given token counts.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownModel`] for models missing from the catalog.
pub fn calculate_model_cost(
    model_id: &str,
    provider: ProviderId,
    input_tokens: u64,
    output_tokens: u64,
) -> Result<f64> {
    Ok(cost_for(get_model(provider, model_id)?, input_tokens, output_tokens))
}

/// Cost formula shared with the accountant.
pub(crate) fn cost_for(model: &ModelDescriptor, input_tokens: u64, output_tokens: u64) -> f64 {
    let cost = input_tokens as f64 / 1e6 * model.input_price
        + output_tokens as f64 / 1e6 * model.output_price;
    cost.max(0.0)
}
