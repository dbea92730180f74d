//! OpenAI sampler implementation

use super::converter::{from_openai_response, to_openai_request};
use super::streaming::decode_event;
use super::types::{OpenAIEmbeddingRequest, OpenAIEmbeddingResponse, OpenAIResponse};
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

/// Model used by [`OpenAISampler::embed`] when none is given
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Sampler for OpenAI-compatible chat-completions APIs
#[derive(Debug, Clone)]
pub struct OpenAISampler {
    base: SamplerBase,
}

impl OpenAISampler {
    /// Create a new OpenAI sampler
    pub fn new(config: &SamplerConfig, settings: &Settings) -> SamplerResult<Self> {
        Ok(Self {
            base: SamplerBase::new(ProviderKind::OpenAI, config, settings)?,
        })
    }

    /// Build request headers
    fn build_headers(&self) -> SamplerResult<HeaderMap> {
        let authorization = format!("Bearer {}", self.base.api_key()?);
        Ok(build_headers(&[("authorization", authorization.as_str())])?)
    }

    fn vendor_error(&self, err: ProviderError) -> SamplerError {
        SamplerError::provider(ProviderKind::OpenAI, err)
    }

    /// Embed a single input text
    pub async fn embed(&self, input: &str, model: Option<&str>) -> SamplerResult<Vec<f32>> {
        let headers = self.build_headers()?;
        let request_id = Uuid::new_v4();
        let body = OpenAIEmbeddingRequest {
            model: model.unwrap_or(DEFAULT_EMBEDDING_MODEL).to_string(),
            input: input.to_string(),
        };

        info!(
            "Requesting embedding from openai with model {} [request_id: {}]",
            body.model, request_id
        );

        let raw = self
            .base
            .http
            .post_for_json(&self.base.url("/embeddings"), headers, &body, request_id)
            .await
            .map_err(|e| self.vendor_error(e))?;

        let response: OpenAIEmbeddingResponse =
            serde_json::from_value(raw).map_err(|e| self.vendor_error(e.into()))?;

        response
            .data
            .into_iter()
            .min_by_key(|embedding| embedding.index)
            .map(|embedding| embedding.embedding)
            .ok_or_else(|| {
                self.vendor_error(ProviderError::ParseError(
                    "embedding response contained no data".to_string(),
                ))
            })
    }
}

#[async_trait]
impl ChatSampler for OpenAISampler {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
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
            "Sending chat request to openai with model {} [request_id: {}]",
            options.model, request_id
        );

        let body = to_openai_request(request, &options, false);
        let raw = self
            .base
            .http
            .post_for_json(&self.base.url("/chat/completions"), headers, &body, request_id)
            .await
            .map_err(|e| self.vendor_error(e))?;

        let parsed: OpenAIResponse =
            serde_json::from_value(raw.clone()).map_err(|e| self.vendor_error(e.into()))?;
        let mut response = from_openai_response(parsed).map_err(|e| self.vendor_error(e))?;
        if response.model.is_empty() {
            response.model = options.model;
        }
        response.raw = raw;

        info!(
            "Chat request completed successfully for openai [request_id: {}]",
            request_id
        );

        Ok(response)
    }

    async fn chat_stream(&self, request: &ChatRequest) -> SamplerResult<TextStream> {
        let options = self.base.resolve(request)?;
        let headers = self.build_headers()?;
        let request_id = Uuid::new_v4();

        info!(
            "Opening chat stream to openai with model {} [request_id: {}]",
            options.model, request_id
        );

        let body = to_openai_request(request, &options, true);
        let response = self
            .base
            .http
            .post_json(&self.base.url("/chat/completions"), headers, &body, request_id)
            .await
            .map_err(|e| self.vendor_error(e))?;

        Ok(fragment_stream(
            ProviderKind::OpenAI,
            response,
            decode_event,
            request_id,
        ))
    }
}
