//! Analysis orchestration.
//!
//! One call per cycle: resolve the model, pace it, build and adapt the
//! prompt, encode for the provider's wire format, POST through the
//! forwarding proxy, then normalize, extract, repair and account.
//!
//! Configuration and transport failures propagate as errors. A reply whose
//! text holds no JSON object degrades to an empty result that still carries
//! the raw text and the call's usage.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::catalog;
use super::correct::correct_all;
use super::cost;
use super::extract::parse_reply;
use super::prompt::{adapt_for_model, build_prompt, strip_search_instructions, ANALYST_PERSONA};
use super::rate_limit::RateLimiter;
use crate::adapter::outbound::llm::{Codec, EncodeParams};
use crate::domain::{AnalysisRequest, AnalysisResult, KeyCheck, ProviderId, Usage};
use crate::error::{Error, Result};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::store::TimestampStore;
use crate::port::outbound::transport::{HttpRequest, HttpTransport};

/// Summary prefix for replies that could not be decoded.
pub const PARSE_FAILURE_SUMMARY: &str = "Failed to parse AI response";

/// Summary used when the request lists no markets.
pub const NO_MARKETS_SUMMARY: &str = "No markets to analyze";

/// Anthropic API version sent on direct key checks.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Where analysis requests are sent.
#[derive(Clone)]
pub struct ProxySettings {
    pub base_url: Url,
    /// Bearer token identifying this service to the proxy.
    pub service_token: Option<String>,
}

impl ProxySettings {
    /// `{base}/{provider}/{path}`.
    #[must_use]
    pub fn endpoint(&self, provider: ProviderId, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            provider,
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for ProxySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxySettings")
            .field("base_url", &self.base_url.as_str())
            .field("service_token", &self.service_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Generation parameters shared by every call.
#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub proxy: ProxySettings,
    pub max_output_tokens: u32,
    pub temperature: f64,
    /// Allow search tools on models that support them.
    pub web_search: bool,
}

/// Entry point for market analysis and key validation.
pub struct Analyzer {
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    limiter: RateLimiter,
    settings: AnalyzerSettings,
}

impl Analyzer {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn TimestampStore>,
        clock: Arc<dyn Clock>,
        settings: AnalyzerSettings,
    ) -> Self {
        Self {
            limiter: RateLimiter::new(store, clock.clone()),
            transport,
            clock,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Analyse `request.markets` with one model.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnknownModel`](crate::error::ConfigError::UnknownModel)
    ///   when the model is not in the catalog (no I/O happens).
    /// - [`Error::Status`] when the proxy or provider answers non-2xx.
    /// - [`Error::Connection`] when no response was received.
    #[instrument(skip(self, request), fields(markets = request.markets.len()))]
    pub async fn analyze_markets(
        &self,
        provider: ProviderId,
        model_id: &str,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult> {
        let model = catalog::get_model(provider, model_id)?;
        let canonical = build_prompt(request);

        if request.markets.is_empty() {
            info!(provider = %provider, model = model.id, "No markets to analyze");
            return Ok(AnalysisResult {
                analyses: Vec::new(),
                skipped: Vec::new(),
                usage: Usage::zero(provider, model.id, self.now()),
                summary: NO_MARKETS_SUMMARY.to_string(),
                prompt: canonical,
                raw_response: String::new(),
                response_time_ms: 0,
            });
        }

        self.limiter.acquire(model).await;

        let (prompt, system, web_search) = if provider.is_reference() {
            (canonical, Some(ANALYST_PERSONA), true)
        } else if self.settings.web_search {
            (adapt_for_model(&canonical, model), None, model.has_web_search)
        } else {
            (strip_search_instructions(&canonical), None, false)
        };

        let codec = Codec::for_provider(provider);
        let mut envelope = codec.encode(&EncodeParams {
            model,
            prompt: &prompt,
            system,
            web_search,
            max_output_tokens: self.settings.max_output_tokens,
            temperature: self.settings.temperature,
        });
        if let Some(key) = request.api_key.as_deref() {
            envelope.attach_key(key);
        }
        debug!(?envelope, web_search, "Encoded provider request");

        let mut http = HttpRequest::post(
            self.settings.proxy.endpoint(provider, &envelope.path),
            envelope.body,
        );
        if let Some(token) = &self.settings.proxy.service_token {
            http = http.header("Authorization", format!("Bearer {token}"));
        }

        let started = Instant::now();
        let response = self.transport.send(http).await?;
        let response_time_ms = started.elapsed().as_millis() as u64;

        if !response.is_success() {
            warn!(
                provider = %provider,
                model = model.id,
                status = response.status,
                "Provider call failed"
            );
            return Err(Error::status(response.status, &response.body));
        }

        let reply = codec.normalize(&response.body);
        let usage = cost::account(model, &reply, self.now());

        let (summary, skipped, analyses) = match parse_reply(&reply.text) {
            Some(parsed) => (
                parsed.summary,
                parsed.skipped,
                correct_all(parsed.recommendations),
            ),
            None => {
                warn!(
                    provider = %provider,
                    model = model.id,
                    chars = reply.text.len(),
                    "No JSON object in model reply"
                );
                (
                    format!("{PARSE_FAILURE_SUMMARY}: no JSON object found"),
                    Vec::new(),
                    Vec::new(),
                )
            }
        };

        info!(
            provider = %provider,
            model = model.id,
            analyses = analyses.len(),
            skipped = skipped.len(),
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            cost_usd = usage.cost_usd,
            web_searches = usage.web_searches,
            response_time_ms,
            "Analysis complete"
        );

        Ok(AnalysisResult {
            analyses,
            skipped,
            usage,
            summary,
            prompt,
            raw_response: reply.text,
            response_time_ms,
        })
    }

    /// Probe the provider's model-listing endpoint directly with `key`.
    ///
    /// Never fails: transport problems become an invalid verdict.
    #[instrument(skip(self, key))]
    pub async fn test_api_key(&self, provider: ProviderId, key: &str) -> KeyCheck {
        let key = key.trim();
        if key.is_empty() {
            return KeyCheck::invalid("No API key provided", 0);
        }

        let url = format!("{}{}", provider.api_base(), provider.models_path());
        let request = with_provider_auth(HttpRequest::get(url), provider, key);

        let started = Instant::now();
        let outcome = self.transport.send(request).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let check = match outcome {
            Ok(response) => KeyCheck::from_status(response.status, latency_ms),
            Err(e) => KeyCheck::invalid(format!("Could not reach {provider}: {e}"), latency_ms),
        };
        info!(provider = %provider, valid = check.valid, latency_ms, "API key check");
        check
    }

    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.clock.now_ms()).unwrap_or_else(Utc::now)
    }
}

/// Attach the provider's native authentication header.
fn with_provider_auth(request: HttpRequest, provider: ProviderId, key: &str) -> HttpRequest {
    match provider {
        ProviderId::Anthropic => request
            .header("x-api-key", key)
            .header("anthropic-version", ANTHROPIC_VERSION),
        ProviderId::Gemini => request.header("x-goog-api-key", key),
        _ => request.header("Authorization", format!("Bearer {key}")),
    }
}
