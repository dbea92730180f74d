//! Sampler trait and provider identities
//!
//! Defines the vendor-neutral chat contract and the closed set of provider
//! variants that implement it.

use super::anthropic::AnthropicSampler;
use super::error::SamplerResult;
use super::openai::OpenAISampler;
use super::stream::TextStream;
use crate::config::ConfigError;
use crate::protocol::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Max tokens used when neither the request nor the sampler sets one
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Core trait every sampler variant implements
#[async_trait]
pub trait ChatSampler: Send + Sync {
    /// Which provider this sampler talks to
    fn kind(&self) -> ProviderKind;

    /// Model used when a request doesn't name one
    fn model(&self) -> &str;

    /// Max tokens used when a request doesn't set them
    fn max_tokens(&self) -> u32;

    /// Send a chat request and wait for the complete response
    async fn chat(&self, request: &ChatRequest) -> SamplerResult<ChatResponse>;

    /// Send a chat request and stream the response text as it arrives.
    ///
    /// Dropping the returned stream releases the underlying connection.
    async fn chat_stream(&self, request: &ChatRequest) -> SamplerResult<TextStream>;
}

/// Supported providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAI,
    Anthropic,
}

impl ProviderKind {
    /// Every provider, in factory preference order
    pub const ALL: [ProviderKind; 2] = [ProviderKind::OpenAI, ProviderKind::Anthropic];

    /// Canonical provider name
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    /// Model used when neither the config nor the request names one
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "gpt-4o-mini",
            ProviderKind::Anthropic => "claude-sonnet-4-20250514",
        }
    }

    /// Public API endpoint
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "https://api.openai.com/v1",
            ProviderKind::Anthropic => "https://api.anthropic.com/v1",
        }
    }

    /// Environment variable holding the API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Environment variable overriding the base URL
    pub fn base_url_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "OPENAI_BASE_URL",
            ProviderKind::Anthropic => "ANTHROPIC_BASE_URL",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "gpt" => Ok(ProviderKind::OpenAI),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            _ => Err(ConfigError::UnknownProvider {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A configured sampler for one of the supported providers
#[derive(Debug, Clone)]
pub enum Sampler {
    OpenAI(OpenAISampler),
    Anthropic(AnthropicSampler),
}

impl Sampler {
    fn inner(&self) -> &dyn ChatSampler {
        match self {
            Sampler::OpenAI(sampler) => sampler,
            Sampler::Anthropic(sampler) => sampler,
        }
    }
}

#[async_trait]
impl ChatSampler for Sampler {
    fn kind(&self) -> ProviderKind {
        self.inner().kind()
    }

    fn model(&self) -> &str {
        self.inner().model()
    }

    fn max_tokens(&self) -> u32 {
        self.inner().max_tokens()
    }

    async fn chat(&self, request: &ChatRequest) -> SamplerResult<ChatResponse> {
        self.inner().chat(request).await
    }

    async fn chat_stream(&self, request: &ChatRequest) -> SamplerResult<TextStream> {
        self.inner().chat_stream(request).await
    }
}
