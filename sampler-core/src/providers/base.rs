//! State and option resolution shared by every sampler variant

use super::adapter::{ProviderKind, DEFAULT_MAX_TOKENS};
use super::error::SamplerResult;
use crate::config::{
    validate_base_url, ConfigError, SamplerConfig, SecretString, Settings, ValidationError,
};
use crate::http::HttpClient;
use crate::protocol::ChatRequest;

/// Options in effect for a single call
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

/// Configuration a sampler carries between calls
#[derive(Debug, Clone)]
pub(crate) struct SamplerBase {
    pub kind: ProviderKind,
    pub http: HttpClient,
    pub model: String,
    pub max_tokens: u32,
    base_url: String,
    api_key: Option<SecretString>,
}

impl SamplerBase {
    pub fn new(
        kind: ProviderKind,
        config: &SamplerConfig,
        settings: &Settings,
    ) -> SamplerResult<Self> {
        config.validate().map_err(ConfigError::from)?;

        let provider_settings = settings.provider(kind);

        let base_url = match config.base_url.as_ref().or(provider_settings.base_url.as_ref()) {
            Some(url) => {
                validate_base_url(kind.base_url_env(), url).map_err(ConfigError::from)?;
                url.trim_end_matches('/').to_string()
            }
            None => kind.default_base_url().to_string(),
        };

        // A missing key is reported on first use, not here
        let api_key = config
            .api_key
            .clone()
            .or_else(|| provider_settings.api_key.clone())
            .filter(|key| !key.is_empty());

        Ok(Self {
            kind,
            http: HttpClient::new()?,
            model: config
                .model
                .clone()
                .filter(|model| !model.is_empty())
                .unwrap_or_else(|| kind.default_model().to_string()),
            max_tokens: config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            base_url,
            api_key,
        })
    }

    /// The API key, or a configuration error naming where to put one
    pub fn api_key(&self) -> SamplerResult<&str> {
        match &self.api_key {
            Some(key) => Ok(key.expose_secret()),
            None => Err(ConfigError::MissingCredential {
                provider: self.kind.to_string(),
                env_var: self.kind.api_key_env().to_string(),
            }
            .into()),
        }
    }

    /// Full URL for an endpoint path such as `/messages`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Validate a request and fill in defaulted options
    pub fn resolve(&self, request: &ChatRequest) -> SamplerResult<ResolvedOptions> {
        if request.messages.is_empty() {
            return Err(ConfigError::EmptyMessages.into());
        }

        let max_tokens = request.options.max_tokens.unwrap_or(self.max_tokens);
        if max_tokens == 0 {
            return Err(ConfigError::from(ValidationError::out_of_range(
                "options.max_tokens",
                "must be greater than zero",
            ))
            .into());
        }

        let model = request
            .options
            .model
            .clone()
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| self.model.clone());

        Ok(ResolvedOptions {
            model,
            max_tokens,
            temperature: request.options.temperature,
        })
    }
}
