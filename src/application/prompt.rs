//! Canonical prompt construction and capability adaptation.
//!
//! [`build_prompt`] renders one provider-agnostic prompt from the cycle's
//! input. [`adapt_for_model`] rewrites the research instructions for models
//! without web search. Both are pure.

use std::fmt::Write as _;

use crate::domain::{AnalysisRequest, ClosedTrade, Market, ModelDescriptor, OpenPosition};

/// Persona sent as the system prompt on the reference path.
pub const ANALYST_PERSONA: &str = "You are a calibrated quantitative analyst for binary prediction markets. \
You answer with a single JSON object and nothing else.";

/// Prepended to prompts for models that cannot search the web.
pub const NO_SEARCH_DISCLAIMER: &str = "NOTE: Live web search is not available for this model. \
Your knowledge stops at your training cutoff, so widen pLow/pHigh for markets that depend on recent events.\n\n";

const RESEARCH_INSTRUCTION: &str =
    "Use web search to find the latest news, polls and official data relevant to each market.";
const SOURCES_INSTRUCTION: &str = "cite the URLs you consulted in \"sources\"";
const EVIDENCE_INSTRUCTION: &str = "Base every estimate on your search results";

const OUTPUT_FORMAT: &str = r#"Respond with exactly one JSON object and no other text:
{
  "summary": "one paragraph on the overall picture",
  "skipped": [{"marketId": "...", "reason": "..."}],
  "recommendations": [
    {
      "marketId": "...",
      "question": "...",
      "recommendedSide": "YES" | "NO" | "SKIP",
      "pReal": 0.00,
      "pMarket": 0.00,
      "pLow": 0.00,
      "pHigh": 0.00,
      "confidence": 0,
      "reasoning": "...",
      "sources": ["..."],
      "kellyFraction": 0.00,
      "suggestedStake": 0.00
    }
  ]
}
"#;

/// Fixed rewrites applied when the model lacks web search.
///
/// No replacement contains any pattern, so the rewrite is idempotent.
const OFFLINE_REWRITES: &[(&str, &str)] = &[
    (
        RESEARCH_INSTRUCTION,
        "Rely on your training data for the most recent news, polls and official data you know about each market.",
    ),
    (SOURCES_INSTRUCTION, "list the sources you remember in \"sources\""),
    (EVIDENCE_INSTRUCTION, "Base every estimate on your training knowledge"),
];

/// Render the canonical analysis prompt.
///
/// Deterministic: the same request always yields the same string, whatever
/// provider it is sent to.
pub fn build_prompt(request: &AnalysisRequest) -> String {
    let mut out = String::new();

    out.push_str(
        "Estimate the true probability that each prediction market below resolves YES, \
compare it with the market price, and recommend a side only where you see a real edge.\n\n",
    );

    out.push_str("## Research\n");
    let _ = writeln!(out, "- {RESEARCH_INSTRUCTION}");
    let _ = writeln!(out, "- Prefer primary sources and {SOURCES_INSTRUCTION}.");
    out.push('\n');

    out.push_str("## Bankroll\n");
    let _ = writeln!(out, "Available bankroll: ${:.2}\n", request.bankroll);

    out.push_str("## Open positions\n");
    if request.open_positions.is_empty() {
        out.push_str("None.\n");
    } else {
        for position in &request.open_positions {
            write_position(&mut out, position);
        }
    }
    out.push('\n');

    if let Some(history) = &request.history {
        out.push_str("## Recent performance\n");
        let _ = writeln!(out, "Total P&L: ${:.2}", history.total_pnl);
        if let Some(win_rate) = history.win_rate {
            let _ = writeln!(out, "Win rate: {:.1}%", win_rate * 100.0);
        }
        for trade in &history.recent {
            write_trade(&mut out, trade);
        }
        out.push('\n');
    }

    out.push_str("## Markets\n");
    for (i, market) in request.markets.iter().enumerate() {
        write_market(&mut out, i + 1, market);
    }
    out.push('\n');

    out.push_str("## Rules\n");
    let _ = writeln!(out, "- {EVIDENCE_INSTRUCTION}, not on the market price alone.");
    out.push_str(
        "- pReal is the probability that the market resolves YES, between 0 and 1, whichever side you recommend.\n\
- pMarket is the YES price shown above.\n\
- recommendedSide is YES when pReal > pMarket, NO when pReal < pMarket, SKIP when there is no meaningful edge.\n\
- pLow and pHigh bound pReal (pLow <= pReal <= pHigh).\n\
- confidence is an integer from 0 to 100.\n\
- Do not add to a market where an open position already expresses the same view.\n\
- kellyFraction and suggestedStake are optional sizing hints in bankroll fraction and USD.\n\n",
    );

    out.push_str("## Output\n");
    out.push_str(OUTPUT_FORMAT);

    out
}

/// Rewrite search-dependent instructions for models without web search.
///
/// Returns the prompt unchanged when the model can search.
pub fn adapt_for_model(prompt: &str, model: &ModelDescriptor) -> String {
    if model.has_web_search {
        return prompt.to_string();
    }
    strip_search_instructions(prompt)
}

/// Apply the offline rewrites and prepend the disclaimer, once.
pub fn strip_search_instructions(prompt: &str) -> String {
    let mut body = prompt.to_string();
    for (pattern, replacement) in OFFLINE_REWRITES {
        body = body.replace(pattern, replacement);
    }
    if body.starts_with(NO_SEARCH_DISCLAIMER) {
        body
    } else {
        format!("{NO_SEARCH_DISCLAIMER}{body}")
    }
}

fn write_market(out: &mut String, n: usize, market: &Market) {
    let _ = writeln!(out, "{n}. [{}] {}", market.id, market.question);
    let _ = write!(
        out,
        "   YES price: {:.3} | Volume: ${:.0} | Liquidity: ${:.0}",
        market.yes_price(),
        market.volume,
        market.liquidity
    );
    if let Some(end) = &market.end_date {
        let _ = write!(out, " | Ends: {end}");
    }
    if let Some(category) = &market.category {
        let _ = write!(out, " | Category: {category}");
    }
    out.push('\n');
    if !market.outcomes.is_empty() {
        let _ = writeln!(out, "   Outcomes: {}", market.outcomes.join(" / "));
    }
}

fn write_position(out: &mut String, position: &OpenPosition) {
    let _ = write!(
        out,
        "- [{}] {} | {} ${:.2} @ {:.3}",
        position.market_id, position.question, position.side, position.size, position.avg_price
    );
    if let Some(current) = position.current_price {
        let _ = write!(out, " (now {current:.3})");
    }
    out.push('\n');
}

fn write_trade(out: &mut String, trade: &ClosedTrade) {
    let _ = writeln!(
        out,
        "- {} | {} @ {:.3} | P&L ${:+.2}",
        trade.question, trade.side, trade.entry_price, trade.pnl
    );
}
