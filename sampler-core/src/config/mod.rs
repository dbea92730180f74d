//! Configuration module for the sampler
//!
//! Provides the sampler construction config, file loading with environment
//! interpolation, and the process-wide settings credentials fall back to.

mod env;
mod error;
mod schema;
mod secrets;

pub use env::{interpolate_env_vars, ProviderSettings, Settings, PROVIDER_ENV_VAR};
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::SamplerConfig;
pub use secrets::SecretString;

pub(crate) use schema::validate_base_url;

use std::fs;
use std::path::Path;

fn read_config(path: &Path) -> ConfigResult<String> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;

    // Interpolate environment variables before parsing
    interpolate_env_vars(&content)
}

/// Load a sampler configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<SamplerConfig> {
    let path = path.as_ref();
    let content = read_config(path)?;

    let config: SamplerConfig =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    config.validate()?;
    Ok(config)
}

/// Load a sampler configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<SamplerConfig> {
    let path = path.as_ref();
    let content = read_config(path)?;

    let config: SamplerConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })?;

    config.validate()?;
    Ok(config)
}

/// Load a configuration file, picking the format from its extension
pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<SamplerConfig> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => load_from_json(path),
        Some("yaml") | Some("yml") => load_from_yaml(path),
        _ => Err(ConfigError::Invalid {
            message: format!(
                "unsupported config file '{}': expected .json, .yaml or .yml",
                path.display()
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_yaml() {
        let yaml = r#"
provider: claude
model: claude-3-5-haiku-latest
max_tokens: 256
"#;
        let config: SamplerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.provider.as_deref(), Some("claude"));
        assert_eq!(config.max_tokens, Some(256));
        assert!(config.api_key.is_none());
    }
}
