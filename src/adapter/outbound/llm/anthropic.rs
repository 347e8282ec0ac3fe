//! Anthropic Messages API codec.
//!
//! Request: `model`, `max_tokens`, optional `temperature` and `system`, one
//! user message, and the `web_search` server tool when search is requested.
//! Response: `text` content blocks are concatenated; `server_tool_use`
//! blocks carry the search queries the model issued.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::EncodeParams;
use crate::domain::NormalizedReply;

/// Messages endpoint relative to the provider root.
const PATH: &str = "v1/messages";

/// Server-side search tool version.
const WEB_SEARCH_TOOL: &str = "web_search_20250305";

/// Upper bound on searches per call.
const MAX_SEARCHES: u32 = 5;

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct Tool {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
    max_uses: u32,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    content: Option<Vec<ContentBlock>>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    usage: ResponseUsage,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        #[serde(default, deserialize_with = "super::null_as_default")]
        text: String,
    },
    ServerToolUse {
        #[serde(default, deserialize_with = "super::null_as_default")]
        name: String,
        #[serde(default)]
        input: Value,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Default)]
struct ResponseUsage {
    #[serde(default, deserialize_with = "super::null_as_default")]
    input_tokens: u64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    output_tokens: u64,
    #[serde(default)]
    server_tool_use: Option<ServerToolUsage>,
}

#[derive(Deserialize)]
struct ServerToolUsage {
    #[serde(default, deserialize_with = "super::null_as_default")]
    web_search_requests: u32,
}

pub(super) fn encode(params: &EncodeParams<'_>) -> (String, Value) {
    let tools = if params.web_search {
        vec![Tool {
            kind: WEB_SEARCH_TOOL,
            name: "web_search",
            max_uses: MAX_SEARCHES,
        }]
    } else {
        Vec::new()
    };
    let request = Request {
        model: params.model.id,
        max_tokens: params.output_cap(),
        temperature: params.sampling_temperature(),
        system: params.system,
        messages: vec![Message {
            role: "user",
            content: params.prompt,
        }],
        tools,
    };
    (PATH.to_string(), serde_json::to_value(request).unwrap_or_default())
}

pub(super) fn normalize(body: &str) -> NormalizedReply {
    let Ok(response) = serde_json::from_str::<Response>(body) else {
        return NormalizedReply::default();
    };
    let Some(content) = response.content else {
        return NormalizedReply::default();
    };

    let mut text = String::new();
    let mut search_queries = Vec::new();
    for block in content {
        match block {
            ContentBlock::Text { text: t } => text.push_str(&t),
            ContentBlock::ServerToolUse { name, input } if name == "web_search" => {
                if let Some(query) = input.get("query").and_then(Value::as_str) {
                    search_queries.push(query.to_string());
                }
            }
            _ => {}
        }
    }

    let web_search_count = response
        .usage
        .server_tool_use
        .map(|u| u.web_search_requests)
        .unwrap_or(search_queries.len() as u32);

    NormalizedReply {
        text,
        input_tokens: response.usage.input_tokens,
        output_tokens: response.usage.output_tokens,
        web_search_count,
        search_queries,
    }
}
