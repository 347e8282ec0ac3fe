//! Market, position and trading-history inputs for an analysis cycle.

use serde::{Deserialize, Serialize};

use super::id::MarketId;
use super::side::Side;

/// A binary prediction market as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: MarketId,
    pub question: String,
    #[serde(default)]
    pub outcomes: Vec<String>,
    #[serde(default)]
    pub outcome_prices: Vec<f64>,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub liquidity: f64,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Market {
    /// Market-implied probability of YES.
    ///
    /// Uses the price paired with the outcome named "Yes", falling back to the
    /// first listed price, then to 0.
    #[must_use]
    pub fn yes_price(&self) -> f64 {
        let idx = self
            .outcomes
            .iter()
            .position(|o| o.eq_ignore_ascii_case("yes"))
            .unwrap_or(0);
        self.outcome_prices
            .get(idx)
            .copied()
            .filter(|p| p.is_finite())
            .unwrap_or(0.0)
    }
}

/// A position the caller currently holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPosition {
    pub market_id: MarketId,
    pub question: String,
    pub side: Side,
    /// Stake in USD.
    pub size: f64,
    pub avg_price: f64,
    #[serde(default)]
    pub current_price: Option<f64>,
}

/// A resolved or closed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTrade {
    pub question: String,
    pub side: Side,
    pub entry_price: f64,
    pub pnl: f64,
}

/// Recent performance fed back into the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeHistory {
    #[serde(default)]
    pub recent: Vec<ClosedTrade>,
    #[serde(default)]
    pub win_rate: Option<f64>,
    #[serde(default)]
    pub total_pnl: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(outcomes: &[&str], prices: &[f64]) -> Market {
        Market {
            id: MarketId::new("m"),
            question: "Q?".into(),
            outcomes: outcomes.iter().map(|s| s.to_string()).collect(),
            outcome_prices: prices.to_vec(),
            volume: 0.0,
            liquidity: 0.0,
            end_date: None,
            category: None,
        }
    }

    #[test]
    fn yes_price_follows_yes_outcome() {
        assert_eq!(market(&["No", "Yes"], &[0.3, 0.7]).yes_price(), 0.7);
        assert_eq!(market(&["YES", "NO"], &[0.42, 0.58]).yes_price(), 0.42);
    }

    #[test]
    fn yes_price_falls_back_to_first_price_then_zero() {
        assert_eq!(market(&["A", "B"], &[0.6, 0.4]).yes_price(), 0.6);
        assert_eq!(market(&[], &[]).yes_price(), 0.0);
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let m: Market = serde_json::from_str(
            r#"{"id":"x","question":"Will it rain?","outcomePrices":[0.2,0.8],"endDate":"2026-12-31"}"#,
        )
        .unwrap();
        assert_eq!(m.outcome_prices, vec![0.2, 0.8]);
        assert_eq!(m.end_date.as_deref(), Some("2026-12-31"));
        assert!(m.outcomes.is_empty());
    }
}
