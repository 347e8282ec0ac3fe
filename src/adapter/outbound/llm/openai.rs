//! OpenAI-compatible chat completions codec.
//!
//! Shared by OpenAI, xAI, Groq and DeepSeek.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::EncodeParams;
use crate::domain::{NormalizedReply, ProviderId};

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_search_options: Option<WebSearchOptions>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct WebSearchOptions {
    search_context_size: &'static str,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    usage: ResponseUsage,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    annotations: Vec<Annotation>,
}

#[derive(Deserialize)]
struct Annotation {
    #[serde(rename = "type", default, deserialize_with = "super::null_as_default")]
    kind: String,
}

#[derive(Deserialize, Default)]
struct ResponseUsage {
    #[serde(default, deserialize_with = "super::null_as_default")]
    prompt_tokens: u64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    completion_tokens: u64,
}

fn path_for(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::DeepSeek => "chat/completions",
        _ => "v1/chat/completions",
    }
}

pub(super) fn encode(params: &EncodeParams<'_>) -> (String, Value) {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = params.system {
        messages.push(Message {
            role: "system",
            content: system,
        });
    }
    messages.push(Message {
        role: "user",
        content: params.prompt,
    });

    let cap = params.output_cap();
    let reasoning = params.model.reasoning;
    // Search-enabled chat models reject sampling parameters.
    let temperature = if params.web_search {
        None
    } else {
        params.sampling_temperature()
    };

    let request = Request {
        model: params.model.id,
        messages,
        max_tokens: (!reasoning).then_some(cap),
        max_completion_tokens: reasoning.then_some(cap),
        temperature,
        web_search_options: params.web_search.then_some(WebSearchOptions {
            search_context_size: "medium",
        }),
    };
    (
        path_for(params.model.provider).to_string(),
        serde_json::to_value(request).unwrap_or_default(),
    )
}

pub(super) fn normalize(body: &str) -> NormalizedReply {
    let Ok(response) = serde_json::from_str::<Response>(body) else {
        return NormalizedReply::default();
    };
    let Some(choices) = response.choices.filter(|c| !c.is_empty()) else {
        return NormalizedReply::default();
    };

    let mut text = String::new();
    let mut citations = 0u32;
    for message in choices.into_iter().filter_map(|c| c.message) {
        if let Some(content) = message.content {
            text.push_str(&content);
        }
        citations += message
            .annotations
            .iter()
            .filter(|a| a.kind == "url_citation")
            .count() as u32;
    }

    NormalizedReply {
        text,
        input_tokens: response.usage.prompt_tokens,
        output_tokens: response.usage.completion_tokens,
        // One search per call when the model cited anything.
        web_search_count: u32::from(citations > 0),
        search_queries: Vec::new(),
    }
}
