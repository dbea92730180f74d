//! Core protocol types for chat sampling
//!
//! These are the vendor-neutral shapes callers build requests from and
//! receive responses in. Each provider variant owns the translation from
//! these types into its own wire format.

use serde::{Deserialize, Serialize};

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User input message
    User,
    /// Assistant (model) response
    Assistant,
    /// System instructions that guide the model's behavior
    System,
}

impl Role {
    /// Wire name shared by both vendors
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// Content of a message
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    /// Plain text content
    Text(String),
    /// Structured content parts (for multimodal support)
    Parts(Vec<ContentPart>),
}

/// Individual content part for multimodal messages
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    /// Text content part
    Text { text: String },

    /// Raw image bytes with their declared media type
    Image {
        data: Vec<u8>,
        media_type: Option<String>,
    },

    /// Image referenced by URL (http(s) or `data:`)
    ImageRef { url: String },

    /// Any other tagged content object, forwarded as-is
    Other(serde_json::Value),
}

impl ContentPart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    /// Create an image part from raw bytes
    pub fn image(data: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        ContentPart::Image {
            data: data.into(),
            media_type: Some(media_type.into()),
        }
    }

    /// Create an image part referencing a URL
    pub fn image_url(url: impl Into<String>) -> Self {
        ContentPart::ImageRef { url: url.into() }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl ChatMessage {
    /// Create a message with plain text content
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a message with structured content parts
    pub fn with_parts(role: Role, parts: Vec<ContentPart>) -> Self {
        Self {
            role,
            content: MessageContent::Parts(parts),
        }
    }

    /// Concatenation of the text carried by this message, in order
    pub fn text(&self) -> String {
        match &self.content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    ContentPart::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
        }
    }
}

/// Per-call sampling options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatOptions {
    /// Model identifier; overrides the sampler's model
    pub model: Option<String>,

    /// Maximum tokens to generate; must be positive
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    pub temperature: Option<f32>,
}

/// Chat request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest {
    /// Optional system prompt
    pub system_prompt: Option<String>,

    /// Messages in the conversation
    pub messages: Vec<ChatMessage>,

    /// Sampling options
    pub options: ChatOptions,
}

impl ChatRequest {
    /// Create a request from a list of messages
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    /// Set the system prompt
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the model for this call
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.options.model = Some(model.into());
        self
    }

    /// Set the max tokens for this call
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }

    /// Set the temperature for this call
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    /// The system prompt, if set and non-empty
    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref().filter(|prompt| !prompt.is_empty())
    }
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u32>,
}

/// Normalized chat response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Concatenated text of the response
    pub text: String,

    /// Token usage
    pub usage: Usage,

    /// Model that produced the response, as reported by the provider
    pub model: String,

    /// Why generation stopped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,

    /// Undecoded vendor response body
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub raw: serde_json::Value,
}
