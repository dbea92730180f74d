//! Conversion between the sampler protocol and Anthropic format
//!
//! The system prompt travels in the top-level `system` field. Image parts are
//! split by origin: inline bytes and `data:` URLs become base64 sources, any
//! other URL becomes a URL source.

use super::types::*;
use crate::protocol::{
    media_type_essence, parse_data_url, ChatMessage, ChatRequest, ChatResponse, ContentPart,
    MessageContent, Role, Usage, DEFAULT_IMAGE_MEDIA_TYPE,
};
use crate::providers::ResolvedOptions;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Convert a ChatRequest to Anthropic format
pub fn to_anthropic_request(
    request: &ChatRequest,
    options: &ResolvedOptions,
    stream: bool,
) -> AnthropicRequest {
    AnthropicRequest {
        model: options.model.clone(),
        max_tokens: options.max_tokens,
        messages: to_anthropic_messages(&request.messages),
        system: system_text(request),
        temperature: options.temperature,
        stream: stream.then_some(true),
    }
}

/// The `system` field: the system prompt followed by any system-role messages
pub fn system_text(request: &ChatRequest) -> Option<String> {
    let hoisted = request
        .messages
        .iter()
        .filter(|message| message.role == Role::System)
        .map(ChatMessage::text);

    let sections: Vec<String> = request
        .system_prompt()
        .map(str::to_string)
        .into_iter()
        .chain(hoisted)
        .filter(|text| !text.is_empty())
        .collect();

    if sections.is_empty() {
        None
    } else {
        Some(sections.join("\n\n"))
    }
}

/// Convert user and assistant messages; system messages are left to `system_text`
pub fn to_anthropic_messages(messages: &[ChatMessage]) -> Vec<AnthropicMessage> {
    messages
        .iter()
        .filter(|message| message.role != Role::System)
        .map(|message| AnthropicMessage {
            role: message.role.as_str().to_string(),
            content: to_anthropic_content(&message.content),
        })
        .collect()
}

fn to_anthropic_content(content: &MessageContent) -> AnthropicContent {
    match content {
        MessageContent::Text(text) => AnthropicContent::Text(text.clone()),
        MessageContent::Parts(parts) => {
            AnthropicContent::Blocks(parts.iter().map(to_anthropic_block).collect())
        }
    }
}

fn to_anthropic_block(part: &ContentPart) -> AnthropicBlock {
    match part {
        ContentPart::Text { text } => {
            AnthropicBlock::Typed(AnthropicTypedBlock::Text { text: text.clone() })
        }
        ContentPart::Image { data, media_type } => {
            let media_type = media_type
                .as_deref()
                .map(media_type_essence)
                .filter(|mt| !mt.is_empty())
                .unwrap_or(DEFAULT_IMAGE_MEDIA_TYPE);
            image_block(AnthropicImageSource::Base64 {
                media_type: media_type.to_string(),
                data: STANDARD.encode(data),
            })
        }
        ContentPart::ImageRef { url } => image_block(match parse_data_url(url) {
            // The Messages API takes bare media types on base64 sources
            Some(inline) => AnthropicImageSource::Base64 {
                media_type: inline.essence().to_string(),
                data: inline.data,
            },
            None => AnthropicImageSource::Url { url: url.clone() },
        }),
        ContentPart::Other(value) => AnthropicBlock::Passthrough(value.clone()),
    }
}

fn image_block(source: AnthropicImageSource) -> AnthropicBlock {
    AnthropicBlock::Typed(AnthropicTypedBlock::Image { source })
}

/// Convert an Anthropic response to the normalized shape (without `raw`)
pub fn from_anthropic_response(response: AnthropicResponse) -> ChatResponse {
    let text = response
        .content
        .into_iter()
        .filter(|block| block.block_type == "text")
        .filter_map(|block| block.text)
        .collect();

    ChatResponse {
        text,
        usage: response
            .usage
            .map(|usage| Usage {
                input_tokens: usage.input_tokens,
                output_tokens: usage.output_tokens,
            })
            .unwrap_or_default(),
        model: response.model,
        stop_reason: response.stop_reason,
        raw: serde_json::Value::Null,
    }
}
