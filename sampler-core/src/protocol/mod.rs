//! Protocol module for chat request/response structures
//!
//! This module defines the vendor-neutral data model every sampler variant
//! accepts and produces, plus helpers for inline image data URLs.

pub mod data_url;
pub mod types;

pub use data_url::{
    media_type_essence, parse_data_url, to_data_url, DataUrl, DEFAULT_IMAGE_MEDIA_TYPE,
};
pub use types::{
    ChatMessage, ChatOptions, ChatRequest, ChatResponse, ContentPart, MessageContent, Role, Usage,
};
