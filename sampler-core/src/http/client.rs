//! HTTP client implementation using reqwest

use crate::config::ConfigError;
use crate::http::error::{map_http_error, parse_retry_after};
use crate::providers::ProviderError;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Default user agent
const USER_AGENT: &str = concat!("sampler/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client with connection pooling
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    ///
    /// No request timeout is set; callers bound calls themselves.
    pub fn new() -> Result<Self, ConfigError> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| ConfigError::Invalid {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// POST a JSON body and return the response once it has a success status
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &T,
        request_id: Uuid,
    ) -> Result<Response, ProviderError> {
        debug!("POST {} [request_id: {}]", url, request_id);

        let response = self
            .client
            .post(url)
            .headers(headers)
            .header("X-Request-ID", request_id.to_string())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("Request error [request_id: {}]: {}", request_id, e);
                ProviderError::from(e)
            })?;

        let status = response.status();
        debug!("Response status: {} [request_id: {}]", status, request_id);

        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);

        // Try to get response body for error details
        let body = response.text().await.ok();

        warn!(
            "Request failed with status {} [request_id: {}]",
            status, request_id
        );

        Err(map_http_error(status, retry_after, body, request_id))
    }

    /// POST a JSON body and decode the JSON reply
    pub async fn post_for_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &T,
        request_id: Uuid,
    ) -> Result<Value, ProviderError> {
        let response = self.post_json(url, headers, body, request_id).await?;

        let text = response.text().await.map_err(|e| {
            ProviderError::Network(format!(
                "Failed to read response body: {} [request_id: {}]",
                e, request_id
            ))
        })?;

        serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse response [request_id: {}]: {}", request_id, e);
            ProviderError::ParseError(format!(
                "Invalid response format: {} [request_id: {}]",
                e, request_id
            ))
        })
    }
}
