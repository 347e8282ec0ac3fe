//! Generation and pacing settings.

use std::path::PathBuf;

use serde::Deserialize;

/// Parameters applied to every analysis call.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Caller-side output cap, further clamped per model. Defaults to 16000.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature (0 to 2); ignored by reasoning models.
    /// Defaults to 0.2.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Use provider search tools when the model supports them.
    #[serde(default = "default_web_search")]
    pub web_search: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            web_search: default_web_search(),
        }
    }
}

/// Rate-limit state location.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateLimitConfig {
    /// JSON file holding last-call timestamps. Defaults to
    /// `<data dir>/edgeseer/rate_limits.json`.
    #[serde(default)]
    pub state_path: Option<PathBuf>,
}

impl RateLimitConfig {
    #[must_use]
    pub fn resolved_state_path(&self) -> PathBuf {
        self.state_path.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("edgeseer")
                .join("rate_limits.json")
        })
    }
}

const fn default_max_output_tokens() -> u32 {
    16_000
}

fn default_temperature() -> f64 {
    0.2
}

const fn default_web_search() -> bool {
    true
}
