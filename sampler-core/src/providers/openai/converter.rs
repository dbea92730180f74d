//! Conversion between the sampler protocol and OpenAI format

use super::types::*;
use crate::protocol::{
    to_data_url, ChatMessage, ChatRequest, ChatResponse, ContentPart, MessageContent, Usage,
};
use crate::providers::{ProviderError, ResolvedOptions};

/// Convert a ChatRequest to OpenAI format
pub fn to_openai_request(
    request: &ChatRequest,
    options: &ResolvedOptions,
    stream: bool,
) -> OpenAIRequest {
    OpenAIRequest {
        model: options.model.clone(),
        messages: to_openai_messages(request),
        max_tokens: options.max_tokens,
        temperature: options.temperature,
        stream: stream.then_some(true),
    }
}

/// Build the message list, with the system prompt as the leading system message
pub fn to_openai_messages(request: &ChatRequest) -> Vec<OpenAIMessage> {
    let system = request.system_prompt().map(|prompt| OpenAIMessage {
        role: "system".to_string(),
        content: OpenAIContent::Text(prompt.to_string()),
    });

    system
        .into_iter()
        .chain(request.messages.iter().map(to_openai_message))
        .collect()
}

fn to_openai_message(message: &ChatMessage) -> OpenAIMessage {
    OpenAIMessage {
        role: message.role.as_str().to_string(),
        content: to_openai_content(&message.content),
    }
}

/// Convert MessageContent to OpenAI format
fn to_openai_content(content: &MessageContent) -> OpenAIContent {
    match content {
        MessageContent::Text(text) => OpenAIContent::Text(text.clone()),
        MessageContent::Parts(parts) => {
            OpenAIContent::Parts(parts.iter().map(to_openai_part).collect())
        }
    }
}

fn to_openai_part(part: &ContentPart) -> OpenAIContentPart {
    match part {
        ContentPart::Text { text } => {
            OpenAIContentPart::Typed(OpenAITypedPart::Text { text: text.clone() })
        }
        ContentPart::Image { data, media_type } => {
            image_part(to_data_url(data, media_type.as_deref()))
        }
        ContentPart::ImageRef { url } => image_part(url.clone()),
        ContentPart::Other(value) => OpenAIContentPart::Passthrough(value.clone()),
    }
}

fn image_part(url: String) -> OpenAIContentPart {
    OpenAIContentPart::Typed(OpenAITypedPart::ImageUrl {
        image_url: OpenAIImageUrl { url },
    })
}

/// Convert an OpenAI response to the normalized shape (without `raw`)
pub fn from_openai_response(response: OpenAIResponse) -> Result<ChatResponse, ProviderError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::ParseError("response contained no choices".to_string()))?;

    let text = match choice.message.content {
        Some(OpenAIResponseContent::Text(text)) => text,
        Some(OpenAIResponseContent::Parts(parts)) => parts
            .into_iter()
            .filter(|part| part.part_type == "text")
            .filter_map(|part| part.text)
            .collect(),
        None => String::new(),
    };

    Ok(ChatResponse {
        text,
        usage: response.usage.map(from_openai_usage).unwrap_or_default(),
        model: response.model,
        stop_reason: choice.finish_reason,
        raw: serde_json::Value::Null,
    })
}

/// Convert OpenAI usage to the normalized shape
fn from_openai_usage(usage: OpenAIUsage) -> Usage {
    Usage {
        input_tokens: usage.prompt_tokens,
        output_tokens: usage.completion_tokens,
    }
}
