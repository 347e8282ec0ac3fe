//! Structured recommendation extraction from free-form model text.
//!
//! Models wrap their JSON in prose or markdown fences, emit numbers as
//! strings, and sometimes list skipped markets as bare ids. Everything here
//! is permissive: a value that cannot be read becomes its zero value.

use serde_json::{Map, Value};

use crate::domain::{MarketId, RawRecommendation, Side, SkippedMarket};

/// The decoded top-level reply object.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub summary: String,
    pub skipped: Vec<SkippedMarket>,
    pub recommendations: Vec<RawRecommendation>,
}

/// Find the first outermost balanced `{...}` in `text` that parses as a JSON
/// object.
///
/// Brace matching skips over string literals and escapes, so braces inside
/// reasoning strings do not confuse it.
pub fn find_json_object(text: &str) -> Option<Map<String, Value>> {
    balanced_spans(text.as_bytes())
        .into_iter()
        .find_map(|(start, end)| match serde_json::from_str(&text[start..=end]) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        })
}

/// Every `{...}` span that balances outside string literals, ordered by its
/// opening brace.
///
/// A single pass from the first `{`. A `}` with nothing open is ignored, and
/// a `{` that is never closed simply yields no span.
fn balanced_spans(bytes: &[u8]) -> Vec<(usize, usize)> {
    let Some(first) = bytes.iter().position(|&b| b == b'{') else {
        return Vec::new();
    };

    let mut open = Vec::new();
    let mut spans = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(first) {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => open.push(i),
            b'}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, i));
                }
            }
            _ => {}
        }
    }
    spans.sort_unstable_by_key(|&(start, _)| start);
    spans
}

/// Decode the reply text into summary, skipped markets and raw items.
///
/// Returns `None` when no JSON object can be found.
pub fn parse_reply(text: &str) -> Option<ParsedReply> {
    let root = find_json_object(text)?;

    let summary = root.get("summary").map(text_of).unwrap_or_default();
    let skipped = array(&root, "skipped").filter_map(skipped_market).collect();
    let recommendations = array(&root, "recommendations")
        .filter_map(Value::as_object)
        .map(raw_recommendation)
        .collect();

    Some(ParsedReply {
        summary,
        skipped,
        recommendations,
    })
}

fn raw_recommendation(item: &Map<String, Value>) -> RawRecommendation {
    RawRecommendation {
        market_id: MarketId::new(
            field(item, &["marketId", "market_id", "id"])
                .map(text_of)
                .unwrap_or_default(),
        ),
        question: field(item, &["question"]).map(text_of).unwrap_or_default(),
        recommended_side: field(item, &["recommendedSide", "recommended_side", "side"])
            .map(|v| Side::parse_lenient(&text_of(v)))
            .unwrap_or(Side::Skip),
        p_real: number(item, &["pReal", "p_real"]),
        p_market: number(item, &["pMarket", "p_market"]),
        p_low: number(item, &["pLow", "p_low"]),
        p_high: number(item, &["pHigh", "p_high"]),
        confidence: number(item, &["confidence"]).trunc() as i64,
        reasoning: field(item, &["reasoning"]).map(text_of).unwrap_or_default(),
        sources: field(item, &["sources"])
            .and_then(Value::as_array)
            .map(|a| a.iter().map(text_of).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default(),
        kelly_fraction: optional_number(item, &["kellyFraction", "kelly_fraction"]),
        suggested_stake: optional_number(item, &["suggestedStake", "suggested_stake"]),
    }
}

fn skipped_market(value: &Value) -> Option<SkippedMarket> {
    match value {
        Value::String(id) => Some(SkippedMarket {
            market_id: MarketId::new(id.as_str()),
            reason: String::new(),
        }),
        Value::Object(map) => Some(SkippedMarket {
            market_id: MarketId::new(field(map, &["marketId", "market_id", "id"]).map(text_of)?),
            reason: field(map, &["reason"]).map(text_of).unwrap_or_default(),
        }),
        _ => None,
    }
}

fn array<'a>(map: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = &'a Value> {
    map.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn field<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| map.get(*k)).filter(|v| !v.is_null())
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Lenient finite number: JSON numbers and numeric strings, else `None`.
fn to_finite(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn number(map: &Map<String, Value>, keys: &[&str]) -> f64 {
    optional_number(map, keys).unwrap_or(0.0)
}

fn optional_number(map: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    field(map, keys).and_then(to_finite)
}
