//! Sampler smoke test
//!
//! Sends one chat request and one streamed request to each provider and
//! reports which ones work.
//!
//! Run with: OPENAI_API_KEY=sk-... cargo run --bin sampler-smoke -- openai claude

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use sampler_core::config::load_from_file;
use sampler_core::{
    create, ChatMessage, ChatRequest, ChatSampler, ProviderKind, SamplerConfig, SecretString,
    Settings,
};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const SYSTEM_PROMPT: &str = "You are a helpful assistant. Be very brief.";

#[derive(Parser)]
#[command(name = "sampler-smoke")]
#[command(about = "Check chat and streaming against live provider APIs", long_about = None)]
struct Cli {
    /// Providers to test (openai, gpt, anthropic, claude). Defaults to every
    /// provider with an API key in the environment.
    providers: Vec<String>,

    /// Base sampler config (YAML or JSON); the provider field is overridden
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Token limit for each test request
    #[arg(long, default_value_t = 50)]
    max_tokens: u32,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    println!("=== Sampler Integration Test ===");

    let base = match &cli.config {
        Some(path) => load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SamplerConfig::new(),
    };

    let settings = Settings::from_env();
    let providers: Vec<String> = if cli.providers.is_empty() {
        settings
            .configured_providers()
            .into_iter()
            .map(|kind| kind.name().to_string())
            .collect()
    } else {
        cli.providers.iter().map(|name| name.to_lowercase()).collect()
    };

    if providers.is_empty() {
        println!("\nNo API keys found. Set OPENAI_API_KEY and/or ANTHROPIC_API_KEY");
        println!("\nUsage:");
        println!("  OPENAI_API_KEY=sk-... sampler-smoke");
        println!("  ANTHROPIC_API_KEY=sk-ant-... sampler-smoke claude");
        return Ok(ExitCode::FAILURE);
    }

    let mut results = Vec::with_capacity(providers.len());
    for provider in providers {
        let mut config = base.clone();
        config.provider = Some(provider.clone());
        if config.max_tokens.is_none() {
            config.max_tokens = Some(cli.max_tokens);
        }
        match credential(&config, &settings, &provider) {
            Some(key) => debug!("{} using API key {}", provider, key.partial_redact()),
            None => debug!("{} has no API key configured", provider),
        }

        let chat_ok = report(&provider, "Chat", test_chat(&config, &provider).await);
        let stream_ok = report(&provider, "Stream", test_stream(&config, &provider).await);
        results.push((provider, chat_ok && stream_ok));
    }

    println!("\n=== Summary ===");
    let mut all_passed = true;
    for (provider, passed) in &results {
        println!("  {}: {}", if *passed { "PASS" } else { "FAIL" }, provider);
        all_passed &= *passed;
    }

    Ok(if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// The key a sampler for `provider` will pick up: config first, then environment
fn credential<'a>(
    config: &'a SamplerConfig,
    settings: &'a Settings,
    provider: &str,
) -> Option<&'a SecretString> {
    let kind: ProviderKind = provider.parse().ok()?;
    config
        .api_key
        .as_ref()
        .or(settings.provider(kind).api_key.as_ref())
        .filter(|key| !key.is_empty())
}

fn report(provider: &str, test: &str, outcome: Result<()>) -> bool {
    match outcome {
        Ok(()) => {
            println!("  PASS");
            true
        }
        Err(e) => {
            debug!("{} {} test failed: {:?}", provider, test, e);
            println!("  FAIL: {:#}", e);
            false
        }
    }
}

async fn test_chat(config: &SamplerConfig, provider: &str) -> Result<()> {
    println!("\n--- Testing {} Chat ---", provider.to_uppercase());

    let sampler = create(config)?;
    let request = ChatRequest::new(vec![ChatMessage::user(format!(
        "Say \"Hello from {}!\" and nothing else.",
        provider
    ))])
    .with_system_prompt(SYSTEM_PROMPT);

    let response = sampler.chat(&request).await?;
    println!("  Response: {}", response.text);
    println!("  Model:    {}", response.model);
    println!(
        "  Tokens:   in={} out={}",
        tokens(response.usage.input_tokens),
        tokens(response.usage.output_tokens)
    );
    Ok(())
}

fn tokens(count: Option<u32>) -> String {
    count.map_or_else(|| "?".to_string(), |n| n.to_string())
}

async fn test_stream(config: &SamplerConfig, provider: &str) -> Result<()> {
    println!("\n--- Testing {} Stream ---", provider.to_uppercase());

    let sampler = create(config)?;
    let request = ChatRequest::new(vec![ChatMessage::user(
        "Count from 1 to 5, separated by commas.",
    )])
    .with_system_prompt(SYSTEM_PROMPT);

    print!("  Streaming: ");
    let mut stream = sampler.chat_stream(&request).await?;
    while let Some(fragment) = stream.next().await {
        print!("{}", fragment?);
        std::io::stdout().flush()?;
    }
    println!();
    Ok(())
}
