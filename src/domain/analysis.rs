//! Recommendation and analysis result types.
//!
//! - [`RawRecommendation`] - one per-market object decoded from model text
//! - [`MarketAnalysis`] - the same item after consistency repair, with edge
//! - [`AnalysisResult`] - the only object handed downstream

use serde::{Deserialize, Serialize};

use super::id::MarketId;
use super::side::Side;
use super::usage::Usage;

/// Per-market recommendation exactly as the model wrote it.
///
/// Numeric fields have already been coerced (unparseable values read as 0)
/// but no consistency repair has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecommendation {
    pub market_id: MarketId,
    pub question: String,
    pub recommended_side: Side,
    pub p_real: f64,
    pub p_market: f64,
    pub p_low: f64,
    pub p_high: f64,
    pub confidence: i64,
    pub reasoning: String,
    pub sources: Vec<String>,
    pub kelly_fraction: Option<f64>,
    pub suggested_stake: Option<f64>,
}

/// A self-consistency repair applied to a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Correction {
    /// `pReal` was read as P(NO) and flipped to P(YES).
    #[serde(rename_all = "camelCase")]
    Orientation { p_real_before: f64, p_real_after: f64 },
    /// The side contradicted `pReal` relative to the market price.
    #[serde(rename_all = "camelCase")]
    Side { from: Side, to: Side },
}

/// A repaired recommendation ready for stake sizing.
///
/// `recommended_side` always agrees with `p_real` relative to `p_market`
/// whenever `p_market` is strictly inside (0.01, 0.99).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub market_id: MarketId,
    pub question: String,
    pub recommended_side: Side,
    /// Side as the model emitted it, before any repair.
    pub original_side: Side,
    pub p_real: f64,
    pub p_market: f64,
    pub p_low: f64,
    pub p_high: f64,
    /// `|p_real - p_market|`.
    pub edge: f64,
    pub confidence: i64,
    pub reasoning: String,
    pub sources: Vec<String>,
    pub kelly_fraction: Option<f64>,
    pub suggested_stake: Option<f64>,
    pub corrections: Vec<Correction>,
}

/// A market the model declined to analyse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedMarket {
    pub market_id: MarketId,
    pub reason: String,
}

/// Outcome of one analysis call, regardless of provider.
///
/// Immutable once returned; the caller persists it for audit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub analyses: Vec<MarketAnalysis>,
    pub skipped: Vec<SkippedMarket>,
    pub usage: Usage,
    pub summary: String,
    pub prompt: String,
    pub raw_response: String,
    pub response_time_ms: u64,
}

impl AnalysisResult {
    /// Analyses whose edge meets `min_edge`.
    pub fn actionable(&self, min_edge: f64) -> impl Iterator<Item = &MarketAnalysis> {
        self.analyses.iter().filter(move |a| a.edge >= min_edge)
    }

    /// Whether any repair was applied to any analysis.
    #[must_use]
    pub fn was_corrected(&self) -> bool {
        self.analyses.iter().any(|a| !a.corrections.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProviderId;
    use chrono::Utc;

    fn analysis(id: &str, edge: f64) -> MarketAnalysis {
        MarketAnalysis {
            market_id: MarketId::new(id),
            question: String::new(),
            recommended_side: Side::Yes,
            original_side: Side::Yes,
            p_real: 0.5 + edge,
            p_market: 0.5,
            p_low: 0.4,
            p_high: 0.6 + edge,
            edge,
            confidence: 60,
            reasoning: String::new(),
            sources: vec![],
            kelly_fraction: None,
            suggested_stake: None,
            corrections: vec![],
        }
    }

    fn result(analyses: Vec<MarketAnalysis>) -> AnalysisResult {
        AnalysisResult {
            analyses,
            skipped: vec![],
            usage: Usage::zero(ProviderId::OpenAi, "gpt-4o", Utc::now()),
            summary: "s".into(),
            prompt: "p".into(),
            raw_response: String::new(),
            response_time_ms: 0,
        }
    }

    #[test]
    fn actionable_filters_by_edge() {
        let r = result(vec![analysis("a", 0.02), analysis("b", 0.10), analysis("c", 0.31)]);
        let ids: Vec<_> = r.actionable(0.05).map(|a| a.market_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn serializes_camel_case_with_tagged_corrections() {
        let mut a = analysis("a", 0.1);
        a.corrections.push(Correction::Side {
            from: Side::Yes,
            to: Side::No,
        });
        let json = serde_json::to_value(result(vec![a])).unwrap();
        assert!(json.get("rawResponse").is_some());
        assert!(json.get("responseTimeMs").is_some());
        let correction = &json["analyses"][0]["corrections"][0];
        assert_eq!(correction["kind"], "side");
        assert_eq!(correction["from"], "YES");
        assert_eq!(correction["to"], "NO");
    }
}
