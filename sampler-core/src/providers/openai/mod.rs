//! OpenAI provider implementation
//!
//! This module provides a sampler for the OpenAI chat-completions API (and
//! compatible servers), translating between the sampler protocol and OpenAI's
//! wire format.

mod client;
pub mod converter;
pub mod streaming;
pub mod types;

pub use client::{OpenAISampler, DEFAULT_EMBEDDING_MODEL};
pub use types::{OpenAIRequest, OpenAIResponse, OpenAIStreamChunk};
