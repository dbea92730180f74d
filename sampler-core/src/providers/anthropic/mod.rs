//! Anthropic provider implementation
//!
//! Sampler for Anthropic's Messages API. Differs from OpenAI in where the
//! system prompt goes and in how images are described.

mod client;
pub mod converter;
pub mod streaming;
pub mod types;

pub use client::AnthropicSampler;
pub use types::{AnthropicRequest, AnthropicResponse, AnthropicStreamEvent};
