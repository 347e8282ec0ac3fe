//! Provider-agnostic reply shape.

use serde::Serialize;

/// What every provider normalizer must emit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReply {
    pub text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub web_search_count: u32,
    pub search_queries: Vec<String>,
}
