//! Environment-scoped settings and `${VAR}` interpolation

use super::error::{ConfigError, ConfigResult};
use super::secrets::SecretString;
use crate::providers::ProviderKind;
use regex::Regex;
use std::env;
use std::sync::OnceLock;

/// Environment variable naming the default provider
pub const PROVIDER_ENV_VAR: &str = "LLM_PROVIDER";

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Interpolate environment variables in a configuration string
pub fn interpolate_env_vars(content: &str) -> ConfigResult<String> {
    let mut missing = None;

    let result = env_var_pattern().replace_all(content, |cap: &regex::Captures<'_>| {
        match env::var(&cap[1]) {
            Ok(value) => value,
            Err(_) => {
                missing.get_or_insert_with(|| cap[1].to_string());
                String::new()
            }
        }
    });

    // Report the first missing variable
    if let Some(var) = missing {
        return Err(ConfigError::EnvVarNotFound { var });
    }

    Ok(result.into_owned())
}

/// Credential and endpoint override for one provider
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub api_key: Option<SecretString>,
    pub base_url: Option<String>,
}

/// Process-wide defaults consulted when a sampler config leaves a value unset
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Provider used when the config names none
    pub default_provider: Option<String>,
    pub openai: ProviderSettings,
    pub anthropic: ProviderSettings,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let provider = |kind: ProviderKind| ProviderSettings {
            api_key: read(kind.api_key_env()).map(SecretString::new),
            base_url: read(kind.base_url_env()),
        };

        Self {
            default_provider: read(PROVIDER_ENV_VAR),
            openai: provider(ProviderKind::OpenAI),
            anthropic: provider(ProviderKind::Anthropic),
        }
    }

    /// Settings for a single provider
    pub fn provider(&self, kind: ProviderKind) -> &ProviderSettings {
        match kind {
            ProviderKind::OpenAI => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
        }
    }

    /// Providers with a credential available
    pub fn configured_providers(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.provider(*kind).api_key.is_some())
            .collect()
    }
}
