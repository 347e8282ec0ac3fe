//! Per-call usage accounting.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::catalog::cost_for;
use crate::domain::{ModelDescriptor, NormalizedReply, Usage};

/// Build the usage record for one call.
pub fn account(model: &ModelDescriptor, reply: &NormalizedReply, at: DateTime<Utc>) -> Usage {
    let cost_usd = cost_for(model, reply.input_tokens, reply.output_tokens);
    debug!(
        provider = %model.provider,
        model = model.id,
        input_tokens = reply.input_tokens,
        output_tokens = reply.output_tokens,
        cost_usd,
        "Accounted call"
    );
    Usage {
        input_tokens: reply.input_tokens,
        output_tokens: reply.output_tokens,
        cost_usd,
        provider: model.provider,
        model: model.id.to_string(),
        timestamp: at,
        web_searches: reply.web_search_count,
        search_queries: reply.search_queries.clone(),
    }
}
