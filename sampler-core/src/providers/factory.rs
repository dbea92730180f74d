//! Sampler construction from configuration

use super::adapter::{ProviderKind, Sampler};
use super::anthropic::AnthropicSampler;
use super::error::SamplerResult;
use super::openai::OpenAISampler;
use crate::config::{SamplerConfig, Settings};
use tracing::debug;

/// Provider used when neither the config nor the environment names one
pub const DEFAULT_PROVIDER: ProviderKind = ProviderKind::OpenAI;

/// Create a sampler, reading fallbacks from the process environment
pub fn create(config: &SamplerConfig) -> SamplerResult<Sampler> {
    create_with_settings(config, &Settings::from_env())
}

/// Create a sampler with explicit process-wide settings.
///
/// Every call builds a new, independent instance.
pub fn create_with_settings(config: &SamplerConfig, settings: &Settings) -> SamplerResult<Sampler> {
    let kind = resolve_provider(config, settings)?;
    debug!("Creating {} sampler", kind);

    Ok(match kind {
        ProviderKind::OpenAI => Sampler::OpenAI(OpenAISampler::new(config, settings)?),
        ProviderKind::Anthropic => Sampler::Anthropic(AnthropicSampler::new(config, settings)?),
    })
}

/// Pick the provider: config, then settings, then the built-in default
pub fn resolve_provider(
    config: &SamplerConfig,
    settings: &Settings,
) -> SamplerResult<ProviderKind> {
    let name = config
        .provider
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .or(settings.default_provider.as_deref());

    match name {
        Some(name) => Ok(name.parse::<ProviderKind>()?),
        None => Ok(DEFAULT_PROVIDER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::providers::{ChatSampler, SamplerError};

    #[test]
    fn test_builtin_default() {
        let kind = resolve_provider(&SamplerConfig::new(), &Settings::default()).unwrap();
        assert_eq!(kind, ProviderKind::OpenAI);
    }

    #[test]
    fn test_settings_default_provider() {
        let settings = Settings {
            default_provider: Some("Claude".to_string()),
            ..Default::default()
        };
        let kind = resolve_provider(&SamplerConfig::new(), &settings).unwrap();
        assert_eq!(kind, ProviderKind::Anthropic);

        // An explicit config value wins over the environment
        let kind = resolve_provider(&SamplerConfig::for_provider("gpt"), &settings).unwrap();
        assert_eq!(kind, ProviderKind::OpenAI);
    }

    #[test]
    fn test_unknown_provider() {
        let config = SamplerConfig::for_provider("unknown");
        let err = create_with_settings(&config, &Settings::default()).unwrap_err();
        assert!(matches!(
            err,
            SamplerError::Configuration(ConfigError::UnknownProvider { .. })
        ));
    }

    #[test]
    fn test_instance_defaults() {
        let sampler =
            create_with_settings(&SamplerConfig::for_provider("claude"), &Settings::default())
                .unwrap();
        assert_eq!(sampler.kind(), ProviderKind::Anthropic);
        assert_eq!(sampler.model(), "claude-sonnet-4-20250514");
        assert_eq!(sampler.max_tokens(), 1024);
    }
}
