//! Wires configuration into a ready [`Analyzer`].

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapter::outbound::clock::SystemClock;
use crate::adapter::outbound::http::ReqwestTransport;
use crate::adapter::outbound::store::JsonFileStore;
use crate::application::{Analyzer, AnalyzerSettings, ProxySettings};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Settings the analyzer needs, taken from `config`.
///
/// # Errors
///
/// Returns a configuration error if the proxy URL does not parse.
#[allow(clippy::result_large_err)]
pub fn analyzer_settings(config: &Config) -> Result<AnalyzerSettings> {
    Ok(AnalyzerSettings {
        proxy: ProxySettings {
            base_url: config.proxy_url()?,
            service_token: config.proxy.service_token.clone(),
        },
        max_output_tokens: config.analysis.max_output_tokens,
        temperature: config.analysis.temperature,
        web_search: config.analysis.web_search,
    })
}

/// Build the production analyzer: reqwest transport, system clock and the
/// JSON-file rate-limit store.
///
/// # Errors
///
/// Returns a configuration error if the proxy URL does not parse.
#[allow(clippy::result_large_err)]
pub fn build_analyzer(config: &Config) -> Result<Analyzer> {
    let settings = analyzer_settings(config)?;
    let state_path = config.rate_limit.resolved_state_path();
    info!(
        proxy = %settings.proxy.base_url,
        state_path = %state_path.display(),
        has_service_token = settings.proxy.service_token.is_some(),
        "Building analyzer"
    );

    Ok(Analyzer::new(
        Arc::new(ReqwestTransport::new(Duration::from_secs(
            config.proxy.timeout_secs,
        ))),
        Arc::new(JsonFileStore::open(state_path)),
        Arc::new(SystemClock),
        settings,
    ))
}
