//! HTTP error mapping utilities

use crate::providers::ProviderError;
use reqwest::StatusCode;
use serde_json::Value;
use uuid::Uuid;

/// Map HTTP status code and response body to a ProviderError
pub fn map_http_error(
    status: StatusCode,
    retry_after_secs: Option<u64>,
    body: Option<String>,
    request_id: Uuid,
) -> ProviderError {
    // Try to parse error details from response body
    let details = body
        .as_deref()
        .and_then(|b| serde_json::from_str::<Value>(b).ok())
        .and_then(|v| extract_error_details(&v));

    let error_message = details
        .as_ref()
        .map(|d| d.message.clone())
        .or_else(|| body.clone().filter(|b| !b.trim().is_empty()))
        .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()));

    // Include request ID in error message
    let message = format!("{} [request_id: {}]", error_message, request_id);

    // Vendor error codes are more specific than the status
    if let Some(code) = details.as_ref().and_then(|d| d.code.as_deref()) {
        match code {
            "insufficient_quota" => return ProviderError::InsufficientQuota(message),
            "model_not_found" => return ProviderError::ModelNotFound(message),
            "invalid_api_key" | "authentication_error" | "permission_error" => {
                return ProviderError::Authentication(message)
            }
            "rate_limit_exceeded" | "rate_limit_error" => {
                return ProviderError::RateLimit {
                    message,
                    retry_after_secs,
                }
            }
            "overloaded_error" => return ProviderError::ServiceUnavailable(message),
            _ => {}
        }
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Authentication(message),

        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimit {
            message,
            retry_after_secs,
        },

        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::InvalidRequest(message)
        }

        StatusCode::NOT_FOUND => ProviderError::ModelNotFound(message),

        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ProviderError::Timeout,

        // 529 is Anthropic's "overloaded"
        status if status.is_server_error() || status.as_u16() == 529 => {
            ProviderError::ServiceUnavailable(message)
        }

        _ => ProviderError::Api {
            code: details
                .and_then(|d| d.code)
                .unwrap_or_else(|| format!("HTTP_{}", status.as_u16())),
            message,
        },
    }
}

/// Error details extracted from response body
struct ErrorDetails {
    message: String,
    code: Option<String>,
}

/// Extract error details from JSON response
fn extract_error_details(json: &Value) -> Option<ErrorDetails> {
    // OpenAI: { "error": { "message": "...", "type": "...", "code": "..." } }
    // Anthropic: { "type": "error", "error": { "type": "...", "message": "..." } }
    if let Some(error) = json.get("error") {
        if let Some(message) = error.get("message").and_then(|v| v.as_str()) {
            let code = error
                .get("code")
                .and_then(|v| v.as_str())
                .or_else(|| error.get("type").and_then(|v| v.as_str()))
                .map(str::to_string);

            return Some(ErrorDetails {
                message: message.to_string(),
                code,
            });
        }

        if let Some(error) = error.as_str() {
            return Some(ErrorDetails {
                message: error.to_string(),
                code: None,
            });
        }
    }

    // Generic format: { "message": "..." }
    json.get("message")
        .and_then(|v| v.as_str())
        .map(|message| ErrorDetails {
            message: message.to_string(),
            code: None,
        })
}

/// Turn an error payload received inside an event stream into a ProviderError
pub(crate) fn stream_error(json: &Value) -> ProviderError {
    match extract_error_details(json) {
        Some(ErrorDetails {
            message,
            code: Some(code),
        }) => match code.as_str() {
            "overloaded_error" => ProviderError::ServiceUnavailable(message),
            "rate_limit_error" | "rate_limit_exceeded" => ProviderError::RateLimit {
                message,
                retry_after_secs: None,
            },
            _ => ProviderError::Api { code, message },
        },
        Some(ErrorDetails {
            message,
            code: None,
        }) => ProviderError::Stream(message),
        None => ProviderError::Stream(json.to_string()),
    }
}

/// Parse Retry-After header value
pub fn parse_retry_after(header_value: &str) -> Option<u64> {
    // HTTP dates are not supported, only delta-seconds
    header_value.trim().parse::<u64>().ok()
}
