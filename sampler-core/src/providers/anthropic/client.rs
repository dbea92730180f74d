//! Anthropic sampler implementation

use super::converter::{from_anthropic_response, to_anthropic_request};
use super::streaming::decode_event;
use super::types::AnthropicResponse;
use crate::config::{SamplerConfig, Settings};
use crate::http::build_headers;
use crate::protocol::{ChatRequest, ChatResponse};
use crate::providers::base::SamplerBase;
use crate::providers::stream::fragment_stream;
use crate::providers::{
    ChatSampler, ProviderError, ProviderKind, SamplerError, SamplerResult, TextStream,
};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use tracing::info;
use uuid::Uuid;

/// Sampler for Anthropic-compatible Messages APIs
#[derive(Debug, Clone)]
pub struct AnthropicSampler {
    base: SamplerBase,
}

impl AnthropicSampler {
    pub const API_VERSION: &'static str = "2023-06-01";

    /// Create a new Anthropic sampler
    pub fn new(config: &SamplerConfig, settings: &Settings) -> SamplerResult<Self> {
        Ok(Self {
            base: SamplerBase::new(ProviderKind::Anthropic, config, settings)?,
        })
    }

    /// Build request headers
    fn build_headers(&self) -> SamplerResult<HeaderMap> {
        Ok(build_headers(&[
            ("x-api-key", self.base.api_key()?),
            ("anthropic-version", Self::API_VERSION),
        ])?)
    }

    fn vendor_error(&self, err: ProviderError) -> SamplerError {
        SamplerError::provider(ProviderKind::Anthropic, err)
    }
}

#[async_trait]
impl ChatSampler for AnthropicSampler {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn model(&self) -> &str {
        &self.base.model
    }

    fn max_tokens(&self) -> u32 {
        self.base.max_tokens
    }

    async fn chat(&self, request: &ChatRequest) -> SamplerResult<ChatResponse> {
        let options = self.base.resolve(request)?;
        let headers = self.build_headers()?;
        let request_id = Uuid::new_v4();

        info!(
            "Sending chat request to anthropic with model {} [request_id: {}]",
            options.model, request_id
        );

        let body = to_anthropic_request(request, &options, false);
        let raw = self
            .base
            .http
            .post_for_json(&self.base.url("/messages"), headers, &body, request_id)
            .await
            .map_err(|e| self.vendor_error(e))?;

        let parsed: AnthropicResponse =
            serde_json::from_value(raw.clone()).map_err(|e| self.vendor_error(e.into()))?;
        let mut response = from_anthropic_response(parsed);
        if response.model.is_empty() {
            response.model = options.model;
        }
        response.raw = raw;

        info!(
            "Chat request completed successfully for anthropic [request_id: {}]",
            request_id
        );

        Ok(response)
    }

    async fn chat_stream(&self, request: &ChatRequest) -> SamplerResult<TextStream> {
        let options = self.base.resolve(request)?;
        let headers = self.build_headers()?;
        let request_id = Uuid::new_v4();

        info!(
            "Opening chat stream to anthropic with model {} [request_id: {}]",
            options.model, request_id
        );

        let body = to_anthropic_request(request, &options, true);
        let response = self
            .base
            .http
            .post_json(&self.base.url("/messages"), headers, &body, request_id)
            .await
            .map_err(|e| self.vendor_error(e))?;

        Ok(fragment_stream(
            ProviderKind::Anthropic,
            response,
            decode_event,
            request_id,
        ))
    }
}
