//! Streaming support for Anthropic responses

use super::types::AnthropicStreamEvent;
use crate::http::error::stream_error;
use crate::providers::{ProviderError, StreamFrame};
use eventsource_stream::Event;

/// Decode one Server-Sent Event from a messages stream.
///
/// Only `content_block_delta` events carrying text produce output.
pub fn decode_event(event: &Event) -> Result<StreamFrame, ProviderError> {
    let data = event.data.trim();
    if data.is_empty() {
        return Ok(StreamFrame::Skip);
    }

    let value: serde_json::Value = serde_json::from_str(data)?;
    let parsed: AnthropicStreamEvent = serde_json::from_value(value.clone())?;

    match parsed.event_type.as_str() {
        "content_block_delta" => Ok(parsed
            .delta
            .and_then(|delta| delta.text)
            .filter(|text| !text.is_empty())
            .map(StreamFrame::Text)
            .unwrap_or(StreamFrame::Skip)),
        "message_stop" => Ok(StreamFrame::Done),
        "error" => Err(stream_error(&value)),
        _ => Ok(StreamFrame::Skip),
    }
}
