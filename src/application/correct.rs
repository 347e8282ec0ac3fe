//! Self-consistency repairs for model recommendations.
//!
//! Both repairs are heuristics, not guaranteed-correct transforms:
//!
//! 1. **Orientation**: a NO recommendation with `pReal > 0.5` is read as the
//!    model having reported P(NO); `pReal` and its bounds are flipped to
//!    P(YES). A model that genuinely believes YES is likelier yet recommends
//!    NO for payoff reasons is indistinguishable and gets flipped too.
//! 2. **Side**: outside the exempt zone near 0 and 1, the side is forced to
//!    agree with `pReal` relative to `pMarket`. The pre-repair side is kept
//!    on the analysis for audit.

use tracing::info;

use crate::domain::{Correction, MarketAnalysis, RawRecommendation, Side};

/// Prices at or beyond these bounds are exempt from the side repair.
pub const SIDE_FIX_LOWER: f64 = 0.01;
pub const SIDE_FIX_UPPER: f64 = 0.99;

/// Flip `pReal` (and swap its bounds) when a NO item reports P(NO).
pub fn fix_orientation(raw: RawRecommendation) -> (RawRecommendation, Option<Correction>) {
    if raw.recommended_side != Side::No || raw.p_real <= 0.5 {
        return (raw, None);
    }
    let correction = Correction::Orientation {
        p_real_before: raw.p_real,
        p_real_after: 1.0 - raw.p_real,
    };
    let fixed = RawRecommendation {
        p_real: 1.0 - raw.p_real,
        p_low: 1.0 - raw.p_high,
        p_high: 1.0 - raw.p_low,
        ..raw
    };
    (fixed, Some(correction))
}

/// Force the side to agree with `pReal` vs `pMarket` inside the active zone.
pub fn fix_side(raw: RawRecommendation) -> (RawRecommendation, Option<Correction>) {
    if raw.p_market <= SIDE_FIX_LOWER || raw.p_market >= SIDE_FIX_UPPER {
        return (raw, None);
    }
    let to = match raw.recommended_side {
        Side::Yes if raw.p_real < raw.p_market => Side::No,
        Side::No if raw.p_real > raw.p_market => Side::Yes,
        _ => return (raw, None),
    };
    let correction = Correction::Side {
        from: raw.recommended_side,
        to,
    };
    (
        RawRecommendation {
            recommended_side: to,
            ..raw
        },
        Some(correction),
    )
}

/// Apply both repairs in order and derive the edge.
///
/// Returns `None` for items whose final side is SKIP.
pub fn correct(raw: RawRecommendation) -> Option<MarketAnalysis> {
    let original_side = raw.recommended_side;
    let mut corrections = Vec::new();

    let (raw, orientation) = fix_orientation(raw);
    corrections.extend(orientation);
    let (raw, side) = fix_side(raw);
    corrections.extend(side);

    if raw.recommended_side == Side::Skip {
        return None;
    }

    for correction in &corrections {
        info!(market_id = %raw.market_id, ?correction, "Applied consistency correction");
    }

    Some(MarketAnalysis {
        edge: (raw.p_real - raw.p_market).abs(),
        market_id: raw.market_id,
        question: raw.question,
        recommended_side: raw.recommended_side,
        original_side,
        p_real: raw.p_real,
        p_market: raw.p_market,
        p_low: raw.p_low,
        p_high: raw.p_high,
        confidence: raw.confidence,
        reasoning: raw.reasoning,
        sources: raw.sources,
        kelly_fraction: raw.kelly_fraction,
        suggested_stake: raw.suggested_stake,
        corrections,
    })
}

/// Repair a batch, dropping SKIP items.
pub fn correct_all(items: Vec<RawRecommendation>) -> Vec<MarketAnalysis> {
    items.into_iter().filter_map(correct).collect()
}
