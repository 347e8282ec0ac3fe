//! Builders for analysis inputs and canned provider replies.

use serde_json::json;

use crate::domain::{AnalysisRequest, Market, MarketId, ProviderId};

/// A two-outcome market priced at `yes_price`.
pub fn market(id: &str, question: &str, yes_price: f64) -> Market {
    Market {
        id: MarketId::new(id),
        question: question.to_string(),
        outcomes: vec!["Yes".into(), "No".into()],
        outcome_prices: vec![yes_price, 1.0 - yes_price],
        volume: 500_000.0,
        liquidity: 40_000.0,
        end_date: Some("2026-12-31".into()),
        category: Some("Politics".into()),
    }
}

/// Two markets and a $1,000 bankroll.
pub fn request() -> AnalysisRequest {
    AnalysisRequest::new(
        vec![
            market("fed", "Will the Fed cut rates in December?", 0.62),
            market("btc", "Will BTC close the year above $150k?", 0.18),
        ],
        1_000.0,
    )
}

/// A reply body covering one clean item, one side contradiction and a skip.
pub fn recommendations_text() -> String {
    json!({
        "summary": "Rates market underprices a cut; crypto market is fair.",
        "skipped": [{"marketId": "btc", "reason": "no edge"}],
        "recommendations": [
            {
                "marketId": "fed",
                "question": "Will the Fed cut rates in December?",
                "recommendedSide": "YES",
                "pReal": 0.74,
                "pMarket": 0.62,
                "pLow": 0.66,
                "pHigh": 0.80,
                "confidence": 71,
                "reasoning": "Futures and recent speeches point to a cut.",
                "sources": ["https://www.federalreserve.gov"]
            },
            {
                "marketId": "btc",
                "recommendedSide": "SKIP",
                "pReal": 0.18,
                "pMarket": 0.18,
                "pLow": 0.1,
                "pHigh": 0.25,
                "confidence": 40
            }
        ]
    })
    .to_string()
}

/// Anthropic Messages response wrapping `text`.
pub fn anthropic_reply(text: &str, input_tokens: u64, output_tokens: u64) -> String {
    json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": input_tokens, "output_tokens": output_tokens}
    })
    .to_string()
}

/// OpenAI-compatible chat completion wrapping `text`.
pub fn openai_reply(text: &str, input_tokens: u64, output_tokens: u64) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": input_tokens,
            "completion_tokens": output_tokens,
            "total_tokens": input_tokens + output_tokens
        }
    })
    .to_string()
}

/// Gemini `generateContent` response wrapping `text`.
pub fn gemini_reply(text: &str, input_tokens: u64, output_tokens: u64) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": input_tokens,
            "candidatesTokenCount": output_tokens
        }
    })
    .to_string()
}

/// The reply shape `provider` speaks, wrapping `text`.
pub fn reply_for(provider: ProviderId, text: &str, input_tokens: u64, output_tokens: u64) -> String {
    match provider {
        ProviderId::Anthropic => anthropic_reply(text, input_tokens, output_tokens),
        ProviderId::Gemini => gemini_reply(text, input_tokens, output_tokens),
        _ => openai_reply(text, input_tokens, output_tokens),
    }
}
