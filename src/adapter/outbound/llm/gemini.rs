//! Gemini `generateContent` codec.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::EncodeParams;
use crate::domain::NormalizedReply;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Request<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Response {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    usage_metadata: UsageMetadata,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default, deserialize_with = "super::null_as_default")]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default, deserialize_with = "super::null_as_default")]
    web_search_queries: Vec<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default, deserialize_with = "super::null_as_default")]
    prompt_token_count: u64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    candidates_token_count: u64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    thoughts_token_count: u64,
}

pub(super) fn encode(params: &EncodeParams<'_>) -> (String, Value) {
    let request = Request {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: params.prompt,
            }],
        }],
        system_instruction: params.system.map(|text| SystemInstruction {
            parts: vec![Part { text }],
        }),
        generation_config: GenerationConfig {
            temperature: params.sampling_temperature(),
            max_output_tokens: params.output_cap(),
        },
        tools: if params.web_search {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        },
    };
    (
        format!("v1beta/models/{}:generateContent", params.model.id),
        serde_json::to_value(request).unwrap_or_default(),
    )
}

pub(super) fn normalize(body: &str) -> NormalizedReply {
    let Ok(response) = serde_json::from_str::<Response>(body) else {
        return NormalizedReply::default();
    };

    let usage = response.usage_metadata;
    let Some(candidate) = response.candidates.and_then(|c| c.into_iter().next()) else {
        return NormalizedReply::default();
    };

    // Thought summaries are not part of the answer.
    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter(|p| !p.thought)
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    let search_queries = candidate
        .grounding_metadata
        .map(|g| g.web_search_queries)
        .unwrap_or_default();

    NormalizedReply {
        text,
        input_tokens: usage.prompt_token_count,
        output_tokens: usage.candidates_token_count + usage.thoughts_token_count,
        web_search_count: search_queries.len() as u32,
        search_queries,
    }
}
