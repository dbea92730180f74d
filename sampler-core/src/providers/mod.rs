//! Provider abstraction
//!
//! This module implements the vendor-neutral chat contract, the OpenAI and
//! Anthropic variants that fulfil it, and the factory that picks between them.

pub mod adapter;
pub mod anthropic;
mod base;
pub mod error;
pub mod factory;
pub mod openai;
pub mod stream;

pub use adapter::{ChatSampler, ProviderKind, Sampler, DEFAULT_MAX_TOKENS};
pub use error::{ProviderError, SamplerError, SamplerResult};
pub use factory::{create, create_with_settings, resolve_provider, DEFAULT_PROVIDER};
pub use stream::{StreamFrame, TextStream};

// Re-export concrete samplers
pub use anthropic::AnthropicSampler;
pub use openai::OpenAISampler;

pub use base::ResolvedOptions;
