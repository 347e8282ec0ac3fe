//! Forwarding proxy settings.

use serde::Deserialize;

/// Proxy that forwards analysis requests to providers.
///
/// The service token is read from `EDGESEER_PROXY_TOKEN` at load time and is
/// never taken from the config file.
#[derive(Clone, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout. Defaults to 120 seconds; search-enabled calls
    /// routinely take over a minute.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(skip)]
    pub service_token: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            service_token: None,
        }
    }
}

impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("service_token", &self.service_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8787".into()
}

const fn default_timeout_secs() -> u64 {
    120
}
