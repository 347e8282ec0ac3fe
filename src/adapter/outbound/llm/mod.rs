//! Provider wire codecs.
//!
//! Each wire format gets one encoder (canonical prompt → provider JSON body)
//! and one normalizer (provider JSON body → [`NormalizedReply`]). The
//! [`Codec`] is picked once from the provider's [`WireFormat`] and is the
//! only place that knows a provider's schema.

pub mod anthropic;
pub mod gemini;
pub mod openai;

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::{ModelDescriptor, NormalizedReply, ProviderId, WireFormat};

/// Body field the forwarding proxy strips and uses as the provider key.
pub const API_KEY_FIELD: &str = "_apiKey";

/// Inputs shared by every encoder.
#[derive(Debug, Clone, Copy)]
pub struct EncodeParams<'a> {
    pub model: &'a ModelDescriptor,
    pub prompt: &'a str,
    /// System instruction, when the caller wants one.
    pub system: Option<&'a str>,
    /// Declare the provider's search tool.
    pub web_search: bool,
    /// Caller's output cap before clamping.
    pub max_output_tokens: u32,
    pub temperature: f64,
}

impl EncodeParams<'_> {
    /// Output cap after applying the model and provider limits.
    #[must_use]
    pub fn output_cap(&self) -> u32 {
        self.model.clamp_output_tokens(self.max_output_tokens)
    }

    /// Sampling temperature, withheld for reasoning models.
    #[must_use]
    pub fn sampling_temperature(&self) -> Option<f64> {
        (!self.model.reasoning).then_some(self.temperature)
    }
}

/// An encoded provider request, ready to be sent through the proxy.
#[derive(Clone)]
pub struct ProviderEnvelope {
    pub provider: ProviderId,
    /// Provider-relative path, without a leading slash.
    pub path: String,
    pub body: Value,
}

impl ProviderEnvelope {
    /// Embed the caller's provider key for the proxy.
    pub fn attach_key(&mut self, key: &str) {
        if let Value::Object(map) = &mut self.body {
            map.insert(API_KEY_FIELD.to_string(), Value::String(key.to_string()));
        }
    }

    #[must_use]
    pub fn has_key(&self) -> bool {
        self.body.get(API_KEY_FIELD).is_some()
    }
}

impl fmt::Debug for ProviderEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEnvelope")
            .field("provider", &self.provider)
            .field("path", &self.path)
            .field("has_key", &self.has_key())
            .finish_non_exhaustive()
    }
}

/// Encoder/normalizer pair for one wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Messages,
    GenerateContent,
    ChatCompletions,
}

impl Codec {
    #[must_use]
    pub const fn for_provider(provider: ProviderId) -> Self {
        match provider.wire_format() {
            WireFormat::Messages => Self::Messages,
            WireFormat::GenerateContent => Self::GenerateContent,
            WireFormat::ChatCompletions => Self::ChatCompletions,
        }
    }

    /// Build the provider request body and path.
    #[must_use]
    pub fn encode(&self, params: &EncodeParams<'_>) -> ProviderEnvelope {
        let (path, body) = match self {
            Self::Messages => anthropic::encode(params),
            Self::GenerateContent => gemini::encode(params),
            Self::ChatCompletions => openai::encode(params),
        };
        ProviderEnvelope {
            provider: params.model.provider,
            path,
            body,
        }
    }

    /// Read a raw response body. Malformed input yields an empty reply.
    #[must_use]
    pub fn normalize(&self, body: &str) -> NormalizedReply {
        match self {
            Self::Messages => anthropic::normalize(body),
            Self::GenerateContent => gemini::normalize(body),
            Self::ChatCompletions => openai::normalize(body),
        }
    }
}

/// Read a JSON `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::catalog::{all_models, get_model};

    fn params(model: &ModelDescriptor) -> EncodeParams<'_> {
        EncodeParams {
            model,
            prompt: "Estimate these markets.",
            system: None,
            web_search: model.has_web_search,
            max_output_tokens: 1_000_000,
            temperature: 0.3,
        }
    }

    #[test]
    fn codec_follows_wire_format() {
        assert_eq!(Codec::for_provider(ProviderId::Anthropic), Codec::Messages);
        assert_eq!(Codec::for_provider(ProviderId::Gemini), Codec::GenerateContent);
        for p in [ProviderId::OpenAi, ProviderId::Xai, ProviderId::Groq, ProviderId::DeepSeek] {
            assert_eq!(Codec::for_provider(p), Codec::ChatCompletions);
        }
    }

    #[test]
    fn every_model_encodes_an_object_with_the_prompt() {
        for model in all_models() {
            let envelope = Codec::for_provider(model.provider).encode(&params(model));
            assert!(envelope.body.is_object(), "{}", model.rate_key());
            assert!(envelope.body.to_string().contains("Estimate these markets."));
            assert!(!envelope.path.starts_with('/'));
            assert_eq!(envelope.provider, model.provider);
        }
    }

    #[test]
    fn output_cap_never_exceeds_limits() {
        for model in all_models() {
            let cap = params(model).output_cap();
            assert!(cap <= model.max_output_tokens);
            assert!(cap <= model.provider.output_ceiling());
        }
        let small = EncodeParams {
            max_output_tokens: 512,
            ..params(get_model(ProviderId::Anthropic, "claude-haiku-4-5").unwrap())
        };
        assert_eq!(small.output_cap(), 512);
    }

    #[test]
    fn attached_key_is_in_body_but_not_debug() {
        let model = get_model(ProviderId::Groq, "llama-3.3-70b-versatile").unwrap();
        let mut envelope = Codec::ChatCompletions.encode(&params(model));
        assert!(!envelope.has_key());
        envelope.attach_key("gsk-very-secret");
        assert_eq!(envelope.body[API_KEY_FIELD], "gsk-very-secret");
        assert!(!format!("{envelope:?}").contains("gsk-very-secret"));
    }

    #[test]
    fn garbage_bodies_normalize_to_empty() {
        for codec in [Codec::Messages, Codec::GenerateContent, Codec::ChatCompletions] {
            for body in ["", "not json", "[]", "null", r#"{"unexpected": true}"#] {
                assert_eq!(codec.normalize(body), NormalizedReply::default(), "{codec:?} {body}");
            }
        }
    }
}
