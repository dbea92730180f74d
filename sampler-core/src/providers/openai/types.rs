//! OpenAI API types
//!
//! These types match the OpenAI chat-completions and embeddings formats and are
//! used for serialization/deserialization when talking to OpenAI-compatible
//! servers.

use serde::{Deserialize, Serialize};

/// OpenAI chat completion request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    pub max_tokens: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// OpenAI request message
#[derive(Debug, Clone, Serialize)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: OpenAIContent,
}

/// OpenAI content (can be string or array of parts)
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OpenAIContent {
    Text(String),
    Parts(Vec<OpenAIContentPart>),
}

/// OpenAI content part; unknown part types are forwarded verbatim
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OpenAIContentPart {
    Typed(OpenAITypedPart),
    Passthrough(serde_json::Value),
}

/// Content part types this library produces
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum OpenAITypedPart {
    #[serde(rename = "text")]
    Text { text: String },

    #[serde(rename = "image_url")]
    ImageUrl { image_url: OpenAIImageUrl },
}

/// OpenAI image URL format
#[derive(Debug, Clone, Serialize)]
pub struct OpenAIImageUrl {
    pub url: String,
}

/// OpenAI chat completion response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,

    #[serde(default)]
    pub usage: Option<OpenAIUsage>,
}

/// OpenAI choice
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIResponseMessage,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant message inside a choice
#[derive(Debug, Deserialize)]
pub struct OpenAIResponseMessage {
    #[serde(default)]
    pub content: Option<OpenAIResponseContent>,
}

/// Response content: usually a string, an array of parts on some compatible servers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OpenAIResponseContent {
    Text(String),
    Parts(Vec<OpenAIResponsePart>),
}

/// One response content part
#[derive(Debug, Deserialize)]
pub struct OpenAIResponsePart {
    #[serde(rename = "type")]
    pub part_type: String,

    #[serde(default)]
    pub text: Option<String>,
}

/// OpenAI usage information
#[derive(Debug, Deserialize)]
pub struct OpenAIUsage {
    #[serde(default)]
    pub prompt_tokens: Option<u32>,

    #[serde(default)]
    pub completion_tokens: Option<u32>,
}

/// OpenAI streaming chunk
#[derive(Debug, Deserialize)]
pub struct OpenAIStreamChunk {
    #[serde(default)]
    pub choices: Vec<OpenAIStreamChoice>,
}

/// OpenAI streaming choice
#[derive(Debug, Deserialize)]
pub struct OpenAIStreamChoice {
    #[serde(default)]
    pub delta: Option<OpenAIDelta>,
}

/// OpenAI delta for streaming
#[derive(Debug, Deserialize, Default)]
pub struct OpenAIDelta {
    #[serde(default)]
    pub content: Option<String>,
}

/// OpenAI embeddings request
#[derive(Debug, Serialize)]
pub struct OpenAIEmbeddingRequest {
    pub model: String,
    pub input: String,
}

/// OpenAI embeddings response
#[derive(Debug, Deserialize)]
pub struct OpenAIEmbeddingResponse {
    pub data: Vec<OpenAIEmbedding>,
}

/// One embedding vector
#[derive(Debug, Deserialize)]
pub struct OpenAIEmbedding {
    #[serde(default)]
    pub index: usize,

    pub embedding: Vec<f32>,
}
