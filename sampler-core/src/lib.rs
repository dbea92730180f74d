//! Sampler Core Library
//!
//! A single chat interface over multiple LLM vendors. Callers build a
//! [`ChatRequest`], obtain a [`Sampler`] from [`create`], and either wait for
//! the full [`ChatResponse`] or consume the reply as a stream of text
//! fragments.
//!
//! ```no_run
//! use futures::StreamExt;
//! use sampler_core::{create, ChatMessage, ChatRequest, ChatSampler, SamplerConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let sampler = create(&SamplerConfig::for_provider("claude"))?;
//! let request = ChatRequest::new(vec![ChatMessage::user("Say hello")])
//!     .with_system_prompt("Be brief.");
//!
//! let response = sampler.chat(&request).await?;
//! println!("{}", response.text);
//!
//! let mut stream = sampler.chat_stream(&request).await?;
//! while let Some(fragment) = stream.next().await {
//!     print!("{}", fragment?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod http;
pub mod protocol;
pub mod providers;

pub use config::{ConfigError, SamplerConfig, SecretString, Settings};
pub use protocol::{
    ChatMessage, ChatOptions, ChatRequest, ChatResponse, ContentPart, MessageContent, Role, Usage,
};
pub use providers::{
    create, create_with_settings, AnthropicSampler, ChatSampler, OpenAISampler, ProviderError,
    ProviderKind, Sampler, SamplerError, SamplerResult, TextStream,
};

/// Returns the version of the sampler core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
