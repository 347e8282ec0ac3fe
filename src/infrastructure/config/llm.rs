//! Default provider and model selection.

use serde::Deserialize;

use crate::domain::ProviderId;

/// Provider/model used when the CLI does not name one.
///
/// The user's provider key is never read from this file; it comes from the
/// environment or the analysis request.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Defaults to `anthropic`.
    #[serde(default = "default_provider")]
    pub provider: ProviderId,

    /// Defaults to "claude-sonnet-4-5".
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
        }
    }
}

fn default_provider() -> ProviderId {
    ProviderId::Anthropic
}

fn default_model() -> String {
    "claude-sonnet-4-5".into()
}
