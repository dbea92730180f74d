//! Anthropic Messages API types

use serde::{Deserialize, Serialize};

/// Anthropic messages request
#[derive(Debug, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<AnthropicMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// Anthropic request message (user or assistant only)
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: AnthropicContent,
}

/// Message content: a plain string or a list of blocks
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnthropicContent {
    Text(String),
    Blocks(Vec<AnthropicBlock>),
}

/// Request content block; unknown block types are forwarded verbatim
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnthropicBlock {
    Typed(AnthropicTypedBlock),
    Passthrough(serde_json::Value),
}

/// Block types this library produces
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicTypedBlock {
    Text { text: String },
    Image { source: AnthropicImageSource },
}

/// Where an image block's bytes come from
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicImageSource {
    Base64 { media_type: String, data: String },
    Url { url: String },
}

/// Anthropic messages response
#[derive(Debug, Deserialize)]
pub struct AnthropicResponse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub content: Vec<AnthropicResponseBlock>,

    #[serde(default)]
    pub stop_reason: Option<String>,

    #[serde(default)]
    pub usage: Option<AnthropicUsage>,
}

/// Response content block; only `text` blocks carry text
#[derive(Debug, Deserialize)]
pub struct AnthropicResponseBlock {
    #[serde(rename = "type")]
    pub block_type: String,

    #[serde(default)]
    pub text: Option<String>,
}

/// Anthropic usage information
#[derive(Debug, Deserialize)]
pub struct AnthropicUsage {
    #[serde(default)]
    pub input_tokens: Option<u32>,

    #[serde(default)]
    pub output_tokens: Option<u32>,
}

/// One streaming event payload
#[derive(Debug, Deserialize)]
pub struct AnthropicStreamEvent {
    #[serde(rename = "type")]
    pub event_type: String,

    #[serde(default)]
    pub delta: Option<AnthropicDelta>,
}

/// Delta carried by `content_block_delta` (and `message_delta`) events
#[derive(Debug, Deserialize)]
pub struct AnthropicDelta {
    #[serde(default)]
    pub text: Option<String>,
}
