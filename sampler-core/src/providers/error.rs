//! Provider error types and handling

use super::adapter::ProviderKind;
use crate::config::ConfigError;
use thiserror::Error;

/// Result type for sampler operations
pub type SamplerResult<T> = Result<T, SamplerError>;

/// Errors surfaced to sampler callers
#[derive(Debug, Error)]
pub enum SamplerError {
    /// Bad or missing configuration; never reaches the network
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The vendor call failed
    #[error("{vendor} request failed: {source}")]
    Provider {
        vendor: ProviderKind,
        #[source]
        source: ProviderError,
    },
}

impl SamplerError {
    /// Wrap a vendor failure
    pub fn provider(vendor: ProviderKind, source: impl Into<ProviderError>) -> Self {
        SamplerError::Provider {
            vendor,
            source: source.into(),
        }
    }

    /// The underlying vendor failure, if this is one
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            SamplerError::Provider { source, .. } => Some(source),
            SamplerError::Configuration(_) => None,
        }
    }
}

/// Errors that can occur when interacting with LLM providers
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or connection error
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        retry_after_secs: Option<u64>,
    },

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider returned an error
    #[error("Provider error: {code}: {message}")]
    Api { code: String, message: String },

    /// Timeout occurred
    #[error("Request timed out")]
    Timeout,

    /// Response parsing error
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Insufficient quota
    #[error("Insufficient quota: {0}")]
    InsufficientQuota(String),

    /// Service unavailable
    #[error("Service temporarily unavailable: {0}")]
    ServiceUnavailable(String),

    /// The event stream failed after it was opened
    #[error("Stream error: {0}")]
    Stream(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_connect() {
            ProviderError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            ProviderError::ParseError(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_provider_error_keeps_cause() {
        let err = SamplerError::provider(
            ProviderKind::Anthropic,
            ProviderError::Authentication("invalid x-api-key".to_string()),
        );

        assert_eq!(
            err.to_string(),
            "anthropic request failed: Authentication failed: invalid x-api-key"
        );
        assert!(err.source().is_some());
        assert!(matches!(
            err.provider_error(),
            Some(ProviderError::Authentication(_))
        ));
    }

    #[test]
    fn test_json_error_is_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(
            ProviderError::from(json_err),
            ProviderError::ParseError(_)
        ));
    }
}
