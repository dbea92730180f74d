//! HTTP layer shared by the provider variants
//!
//! Handles connection pooling, request ID correlation, and mapping of
//! non-success responses onto `ProviderError`.

pub mod client;
pub mod error;

pub use client::HttpClient;
pub use error::{map_http_error, parse_retry_after};

use crate::config::ConfigError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Build a header map, rejecting values that can't be sent (e.g. a key with a newline)
pub(crate) fn build_headers(pairs: &[(&'static str, &str)]) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let value = HeaderValue::from_str(value).map_err(|_| ConfigError::Invalid {
            message: format!("value for header '{}' contains invalid characters", name),
        })?;
        headers.insert(HeaderName::from_static(name), value);
    }
    Ok(headers)
}
