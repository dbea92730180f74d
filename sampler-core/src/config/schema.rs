//! Sampler configuration with serde support

use super::error::ValidationError;
use super::secrets::SecretString;
use serde::{Deserialize, Serialize};

/// Construction parameters for a sampler
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SamplerConfig {
    /// Provider name or alias (openai, gpt, anthropic, claude)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// API key; falls back to the provider's environment credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SecretString>,

    /// Model; falls back to the provider default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Maximum tokens per response (default 1024)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Base URL override for OpenAI- or Anthropic-compatible endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl SamplerConfig {
    /// Create an empty configuration (every value defaulted)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for a named provider
    pub fn for_provider(provider: impl Into<String>) -> Self {
        Self {
            provider: Some(provider.into()),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<SecretString>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Validate value ranges and URL shape
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_tokens == Some(0) {
            return Err(ValidationError::out_of_range(
                "max_tokens",
                "must be greater than zero",
            ));
        }

        if let Some(base_url) = &self.base_url {
            validate_base_url("base_url", base_url)?;
        }

        Ok(())
    }
}

/// Check that a base URL is an absolute http(s) URL
pub(crate) fn validate_base_url(field_path: &str, base_url: &str) -> Result<(), ValidationError> {
    let parsed = url::Url::parse(base_url)
        .map_err(|e| ValidationError::invalid_url(field_path, e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ValidationError::invalid_url(
            field_path,
            format!("unsupported scheme '{}'", scheme),
        )),
    }
}
