//! Live checks against real providers.
//!
//! Gated behind the `integration-tests` feature and marked `#[ignore]`.
//!
//! ```bash
//! export ANTHROPIC_API_KEY="..."
//! export OPENAI_API_KEY="..."
//! export GEMINI_API_KEY="..."
//! # analysis tests also need a running proxy
//! export EDGESEER_PROXY_URL="http://127.0.0.1:8787"
//! cargo test --features integration-tests -- --ignored --nocapture
//! ```
//!
//! Analysis tests make real, billed calls on the cheapest catalog models.

#![cfg(feature = "integration-tests")]

use edgeseer::application::Analyzer;
use edgeseer::domain::{AnalysisRequest, ProviderId};
use edgeseer::infrastructure::bootstrap::build_analyzer;
use edgeseer::infrastructure::config::settings::Config;
use edgeseer::testkit::fixtures;

fn analyzer(dir: &tempfile::TempDir) -> Analyzer {
    let proxy = std::env::var("EDGESEER_PROXY_URL").unwrap_or_else(|_| "http://127.0.0.1:8787".into());
    let toml = format!(
        "[proxy]\nbase_url = {proxy:?}\n[rate_limit]\nstate_path = {:?}\n",
        dir.path().join("limits.json").display().to_string()
    );
    build_analyzer(&Config::parse_toml(&toml).unwrap()).unwrap()
}

fn key(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(k) if !k.trim().is_empty() => Some(k),
        _ => {
            eprintln!("Skipping: {var} not set");
            None
        }
    }
}

mod key_check {
    use super::*;

    async fn check(provider: ProviderId, var: &str) {
        let Some(key) = key(var) else { return };
        let dir = tempfile::tempdir().unwrap();
        let check = analyzer(&dir).test_api_key(provider, &key).await;
        println!("{provider}: {} ({}ms)", check.message, check.latency_ms);
        assert!(check.valid, "{}", check.message);
    }

    #[tokio::test]
    #[ignore = "requires ANTHROPIC_API_KEY and network access"]
    async fn anthropic_key_is_accepted() {
        check(ProviderId::Anthropic, "ANTHROPIC_API_KEY").await;
    }

    #[tokio::test]
    #[ignore = "requires OPENAI_API_KEY and network access"]
    async fn openai_key_is_accepted() {
        check(ProviderId::OpenAi, "OPENAI_API_KEY").await;
    }

    #[tokio::test]
    #[ignore = "requires GEMINI_API_KEY and network access"]
    async fn gemini_key_is_accepted() {
        check(ProviderId::Gemini, "GEMINI_API_KEY").await;
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn bogus_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let check = analyzer(&dir)
            .test_api_key(ProviderId::OpenAi, "sk-definitely-not-a-key")
            .await;
        assert!(!check.valid);
    }
}

mod analysis {
    use super::*;

    async fn run(provider: ProviderId, model: &str, var: &str) {
        let Some(key) = key(var) else { return };
        let dir = tempfile::tempdir().unwrap();
        let request: AnalysisRequest = fixtures::request().with_api_key(key);

        let result = analyzer(&dir)
            .analyze_markets(provider, model, &request)
            .await
            .unwrap();

        println!("{}", serde_json::to_string_pretty(&result).unwrap());
        assert!(result.usage.input_tokens > 0);
        for analysis in &result.analyses {
            assert!((0.0..=1.0).contains(&analysis.p_real));
        }
    }

    #[tokio::test]
    #[ignore = "requires ANTHROPIC_API_KEY, a running proxy and network access"]
    async fn anthropic_round_trip() {
        run(ProviderId::Anthropic, "claude-haiku-4-5", "ANTHROPIC_API_KEY").await;
    }

    #[tokio::test]
    #[ignore = "requires OPENAI_API_KEY, a running proxy and network access"]
    async fn openai_round_trip() {
        run(ProviderId::OpenAi, "gpt-4.1-mini", "OPENAI_API_KEY").await;
    }

    #[tokio::test]
    #[ignore = "requires GEMINI_API_KEY, a running proxy and network access"]
    async fn gemini_round_trip() {
        run(ProviderId::Gemini, "gemini-2.0-flash", "GEMINI_API_KEY").await;
    }
}
