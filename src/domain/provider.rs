//! Provider identity and wire-format families.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Supported text-generation providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Anthropic Claude models. The reference provider.
    Anthropic,
    /// OpenAI GPT and o-series models.
    OpenAi,
    /// Google Gemini models.
    Gemini,
    /// xAI Grok models.
    Xai,
    /// Groq-hosted open models.
    Groq,
    /// DeepSeek models.
    DeepSeek,
}

/// Request/response schema family spoken by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// Anthropic Messages API (`content` blocks).
    Messages,
    /// Gemini `generateContent` (`candidates`/`parts`).
    GenerateContent,
    /// OpenAI-compatible chat completions (`choices`/`message`).
    ChatCompletions,
}

impl ProviderId {
    /// Every provider, in catalog order.
    pub const ALL: [ProviderId; 6] = [
        ProviderId::Anthropic,
        ProviderId::OpenAi,
        ProviderId::Gemini,
        ProviderId::Xai,
        ProviderId::Groq,
        ProviderId::DeepSeek,
    ];

    /// Lowercase name used in config, proxy paths and rate-limit keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Xai => "xai",
            Self::Groq => "groq",
            Self::DeepSeek => "deepseek",
        }
    }

    #[must_use]
    pub const fn wire_format(&self) -> WireFormat {
        match self {
            Self::Anthropic => WireFormat::Messages,
            Self::Gemini => WireFormat::GenerateContent,
            Self::OpenAi | Self::Xai | Self::Groq | Self::DeepSeek => WireFormat::ChatCompletions,
        }
    }

    /// Whether this provider takes the specialized orchestration path.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::Anthropic)
    }

    /// Provider API root, used for key validation.
    #[must_use]
    pub const fn api_base(&self) -> &'static str {
        match self {
            Self::Anthropic => "https://api.anthropic.com",
            Self::OpenAi => "https://api.openai.com",
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::Xai => "https://api.x.ai",
            Self::Groq => "https://api.groq.com/openai",
            Self::DeepSeek => "https://api.deepseek.com",
        }
    }

    /// Model-listing endpoint relative to [`api_base`](Self::api_base).
    #[must_use]
    pub const fn models_path(&self) -> &'static str {
        match self {
            Self::Gemini => "/v1beta/models?pageSize=1",
            Self::DeepSeek => "/models",
            _ => "/v1/models",
        }
    }

    /// Hard ceiling on output tokens accepted by the provider API.
    #[must_use]
    pub const fn output_ceiling(&self) -> u32 {
        match self {
            Self::Anthropic => 64_000,
            Self::OpenAi => 100_000,
            Self::Gemini => 65_536,
            Self::Xai => 131_072,
            Self::Groq => 32_768,
            Self::DeepSeek => 65_536,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or(ConfigError::UnknownProvider(s.to_string()))
    }
}
