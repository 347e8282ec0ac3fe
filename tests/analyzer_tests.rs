//! End-to-end analyzer behaviour against a scripted transport.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use url::Url;

use edgeseer::adapter::outbound::store::MemoryStore;
use edgeseer::application::analyzer::{NO_MARKETS_SUMMARY, PARSE_FAILURE_SUMMARY};
use edgeseer::application::{Analyzer, AnalyzerSettings, ProxySettings};
use edgeseer::domain::{AnalysisRequest, ProviderId, Side};
use edgeseer::error::{Error, STATUS_BODY_LIMIT};
use edgeseer::port::outbound::store::TimestampStore;
use edgeseer::testkit::clock::ManualClock;
use edgeseer::testkit::fixtures;
use edgeseer::testkit::transport::ScriptedTransport;

struct Harness {
    transport: Arc<ScriptedTransport>,
    store: Arc<MemoryStore>,
    clock: Arc<ManualClock>,
    analyzer: Analyzer,
}

fn harness() -> Harness {
    let transport = Arc::new(ScriptedTransport::new());
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let analyzer = Analyzer::new(
        transport.clone(),
        store.clone(),
        clock.clone(),
        AnalyzerSettings {
            proxy: ProxySettings {
                base_url: Url::parse("https://proxy.test").unwrap(),
                service_token: Some("svc-token-xyz".into()),
            },
            max_output_tokens: 8_000,
            temperature: 0.2,
            web_search: true,
        },
    );
    Harness {
        transport,
        store,
        clock,
        analyzer,
    }
}

#[tokio::test]
async fn empty_markets_cost_nothing_and_send_nothing() {
    let h = harness();
    let request = AnalysisRequest::new(vec![], 500.0);

    let result = h
        .analyzer
        .analyze_markets(ProviderId::Groq, "llama-3.3-70b-versatile", &request)
        .await
        .unwrap();

    assert_eq!(result.usage.cost_usd, 0.0);
    assert_eq!(result.usage.input_tokens, 0);
    assert!(result.analyses.is_empty());
    assert_eq!(result.summary, NO_MARKETS_SUMMARY);
    assert_eq!(h.transport.calls(), 0);
    assert!(h.store.is_empty(), "empty cycles must not consume the rate budget");
}

#[tokio::test]
async fn paced_model_waits_out_the_interval() {
    let h = harness();
    let model = "llama-3.3-70b-versatile";
    let request = fixtures::request();
    for _ in 0..3 {
        h.transport
            .push_ok(fixtures::openai_reply(&fixtures::recommendations_text(), 10, 10));
    }

    let t0 = h.clock.now_ms();
    h.analyzer
        .analyze_markets(ProviderId::Groq, model, &request)
        .await
        .unwrap();
    assert_eq!(h.clock.sleeps(), 0);

    h.clock.advance(1_200);
    h.analyzer
        .analyze_markets(ProviderId::Groq, model, &request)
        .await
        .unwrap();
    let second_dispatch = h.clock.now_ms();
    assert!(second_dispatch >= t0 + 5_000);
    assert_eq!(h.clock.sleeps(), 1);

    h.clock.advance(5_000);
    h.analyzer
        .analyze_markets(ProviderId::Groq, model, &request)
        .await
        .unwrap();
    assert_eq!(h.clock.sleeps(), 1, "third call after the interval is not delayed");
    assert_eq!(h.transport.calls(), 3);
    assert_eq!(
        h.store.get("groq:llama-3.3-70b-versatile"),
        Some(second_dispatch + 5_000)
    );
}

#[tokio::test]
async fn providers_are_interchangeable() {
    let cases = [
        (ProviderId::Anthropic, "claude-haiku-4-5"),
        (ProviderId::OpenAi, "gpt-4o"),
        (ProviderId::Gemini, "gemini-2.5-flash"),
        (ProviderId::Xai, "grok-3-mini"),
        (ProviderId::Groq, "llama-3.3-70b-versatile"),
        (ProviderId::DeepSeek, "deepseek-chat"),
    ];
    let text = fixtures::recommendations_text();
    let request = fixtures::request();

    let mut results = Vec::new();
    for (provider, model) in cases {
        let h = harness();
        h.transport
            .push_ok(fixtures::reply_for(provider, &text, 20_000, 1_500));
        let result = h
            .analyzer
            .analyze_markets(provider, model, &request)
            .await
            .unwrap();
        assert_eq!(result.usage.model, model);
        assert_eq!(result.usage.provider, provider);
        assert_eq!(result.usage.input_tokens, 20_000);
        assert!(result.usage.cost_usd > 0.0);
        results.push(result);
    }

    let reference = &results[0];
    let keys = |r: &edgeseer::domain::AnalysisResult| {
        serde_json::to_value(r)
            .unwrap()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect::<Vec<_>>()
    };
    for result in &results[1..] {
        assert_eq!(keys(result), keys(reference));
        assert_eq!(result.analyses, reference.analyses);
        assert_eq!(result.skipped, reference.skipped);
        assert_eq!(result.summary, reference.summary);
    }

    assert_eq!(reference.analyses.len(), 1);
    assert_eq!(reference.analyses[0].recommended_side, Side::Yes);
    assert!((reference.analyses[0].edge - 0.12).abs() < 1e-9);
    assert_eq!(reference.skipped[0].market_id.as_str(), "btc");
}

#[tokio::test]
async fn reply_without_json_degrades_gracefully() {
    let h = harness();
    let text = "I'm sorry, I can't provide forecasts for these markets.";
    h.transport.push_ok(fixtures::openai_reply(text, 3_000, 40));

    let result = h
        .analyzer
        .analyze_markets(ProviderId::OpenAi, "gpt-4.1-mini", &fixtures::request())
        .await
        .unwrap();

    assert!(result.analyses.is_empty());
    assert!(result.summary.starts_with(PARSE_FAILURE_SUMMARY));
    assert_eq!(result.raw_response, text);
    assert_eq!(result.usage.input_tokens, 3_000);
    assert!(result.usage.cost_usd > 0.0);
}

#[tokio::test]
async fn null_usage_keeps_the_recommendations() {
    let h = harness();
    let body = serde_json::json!({
        "choices": [{"message": {"content": fixtures::recommendations_text(), "annotations": null}}],
        "usage": null
    });
    h.transport.push_ok(body.to_string());

    let result = h
        .analyzer
        .analyze_markets(ProviderId::OpenAi, "gpt-4o", &fixtures::request())
        .await
        .unwrap();

    assert_eq!(result.analyses.len(), 1);
    assert!(!result.summary.starts_with(PARSE_FAILURE_SUMMARY));
    assert_eq!(result.usage.input_tokens, 0);
    assert_eq!(result.usage.cost_usd, 0.0);
}

#[tokio::test]
async fn non_2xx_is_a_status_error_with_truncated_body() {
    let h = harness();
    h.transport.push(502, "upstream exploded ".repeat(100));

    let err = h
        .analyzer
        .analyze_markets(ProviderId::Xai, "grok-4", &fixtures::request())
        .await
        .unwrap_err();

    match err {
        Error::Status { status, body } => {
            assert_eq!(status, 502);
            assert!(body.chars().count() <= STATUS_BODY_LIMIT + 3);
            assert!(body.starts_with("upstream exploded"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(h.transport.calls(), 1, "no automatic retry");
}

#[tokio::test]
async fn network_failure_is_a_connection_error() {
    let h = harness();
    h.transport.push_error("connection reset by peer");

    let err = h
        .analyzer
        .analyze_markets(ProviderId::OpenAi, "gpt-4o", &fixtures::request())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Connection(ref m) if m.contains("reset")));
    assert_eq!(h.transport.calls(), 1);
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn user_key_reaches_the_body_but_never_the_logs() {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let h = harness();
    h.transport.push_ok(fixtures::gemini_reply(&fixtures::recommendations_text(), 10, 10));
    let request = fixtures::request().with_api_key("AIza-super-secret-key");

    h.analyzer
        .analyze_markets(ProviderId::Gemini, "gemini-2.5-pro", &request)
        .await
        .unwrap();
    h.analyzer
        .test_api_key(ProviderId::Gemini, "AIza-super-secret-key")
        .await;

    let sent = &h.transport.requests()[0];
    assert_eq!(
        sent.url,
        "https://proxy.test/gemini/v1beta/models/gemini-2.5-pro:generateContent"
    );
    assert_eq!(
        sent.body.as_ref().unwrap()["_apiKey"],
        "AIza-super-secret-key"
    );

    let logs = String::from_utf8(capture.0.lock().clone()).unwrap();
    assert!(logs.contains("Analysis complete"));
    assert!(!logs.contains("AIza-super-secret-key"));
    assert!(!logs.contains("svc-token-xyz"), "service token must not be logged either");
}
