//! Streaming support for OpenAI responses

use super::types::OpenAIStreamChunk;
use crate::http::error::stream_error;
use crate::providers::{ProviderError, StreamFrame};
use eventsource_stream::Event;

/// Decode one Server-Sent Event from a chat-completions stream.
///
/// OpenAI sends `data: {...json...}` per chunk and `data: [DONE]` at the end.
pub fn decode_event(event: &Event) -> Result<StreamFrame, ProviderError> {
    let data = event.data.trim();
    if data.is_empty() {
        return Ok(StreamFrame::Skip);
    }
    if data == "[DONE]" {
        return Ok(StreamFrame::Done);
    }

    let value: serde_json::Value = match serde_json::from_str(data) {
        Ok(value) => value,
        Err(e) => {
            // Log parsing error but continue stream
            tracing::warn!("Failed to parse stream chunk: {}", e);
            return Ok(StreamFrame::Skip);
        }
    };

    if value.get("error").is_some() {
        return Err(stream_error(&value));
    }

    match serde_json::from_value::<OpenAIStreamChunk>(value) {
        Ok(chunk) => Ok(chunk_text(chunk)),
        Err(e) => {
            tracing::warn!("Failed to parse stream chunk: {}", e);
            Ok(StreamFrame::Skip)
        }
    }
}

fn chunk_text(chunk: OpenAIStreamChunk) -> StreamFrame {
    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content)
        .filter(|content| !content.is_empty())
        .map(StreamFrame::Text)
        .unwrap_or(StreamFrame::Skip)
}
