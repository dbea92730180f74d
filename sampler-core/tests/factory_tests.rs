//! Tests for sampler selection and construction

use sampler_core::config::ProviderSettings;
use sampler_core::providers::{create_with_settings, resolve_provider};
use sampler_core::{
    ChatMessage, ChatRequest, ChatSampler, ConfigError, ProviderKind, SamplerConfig, SamplerError,
    SecretString, Settings,
};
use serde_json::json;
use std::collections::HashMap;
use test_case::test_case;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test_case("openai", ProviderKind::OpenAI ; "openai")]
#[test_case("gpt", ProviderKind::OpenAI ; "gpt alias")]
#[test_case("anthropic", ProviderKind::Anthropic ; "anthropic")]
#[test_case("claude", ProviderKind::Anthropic ; "claude alias")]
#[test_case("CLAUDE", ProviderKind::Anthropic ; "case insensitive")]
#[test_case(" OpenAI ", ProviderKind::OpenAI ; "surrounding whitespace")]
fn test_provider_aliases(name: &str, expected: ProviderKind) {
    let sampler =
        create_with_settings(&SamplerConfig::for_provider(name), &Settings::default()).unwrap();
    assert_eq!(sampler.kind(), expected);
}

#[test_case("mistral" ; "other vendor")]
#[test_case("open-ai" ; "misspelled")]
fn test_unknown_provider(name: &str) {
    match create_with_settings(&SamplerConfig::for_provider(name), &Settings::default()) {
        Err(SamplerError::Configuration(ConfigError::UnknownProvider { name: reported })) => {
            assert_eq!(reported, name);
        }
        other => panic!("Expected UnknownProvider, got {:?}", other.map(|s| s.kind())),
    }
}

#[test_case(ProviderKind::OpenAI, "gpt-4o-mini" ; "openai")]
#[test_case(ProviderKind::Anthropic, "claude-sonnet-4-20250514" ; "anthropic")]
fn test_default_model_and_max_tokens(kind: ProviderKind, model: &str) {
    let config = SamplerConfig::for_provider(kind.name());
    let sampler = create_with_settings(&config, &Settings::default()).unwrap();

    assert_eq!(sampler.model(), model);
    assert_eq!(sampler.max_tokens(), 1024);
}

#[test]
fn test_explicit_values_win() {
    let config = SamplerConfig::for_provider("gpt")
        .with_model("gpt-4.1")
        .with_max_tokens(300);
    let sampler = create_with_settings(&config, &Settings::default()).unwrap();

    assert_eq!(sampler.model(), "gpt-4.1");
    assert_eq!(sampler.max_tokens(), 300);
}

#[test]
fn test_provider_from_environment() {
    let vars: HashMap<&str, &str> = HashMap::from([("LLM_PROVIDER", "claude")]);
    let settings = Settings::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

    assert_eq!(
        resolve_provider(&SamplerConfig::new(), &settings).unwrap(),
        ProviderKind::Anthropic
    );
    assert_eq!(
        resolve_provider(&SamplerConfig::new(), &Settings::default()).unwrap(),
        ProviderKind::OpenAI
    );
}

#[test]
fn test_invalid_base_url_fails_construction() {
    let config = SamplerConfig::for_provider("openai").with_base_url("localhost:8080");
    assert!(matches!(
        create_with_settings(&config, &Settings::default()),
        Err(SamplerError::Configuration(ConfigError::ValidationError(_)))
    ));
}

#[test]
fn test_instances_are_independent() {
    let first = create_with_settings(
        &SamplerConfig::for_provider("claude").with_model("claude-3-5-haiku-latest"),
        &Settings::default(),
    )
    .unwrap();
    let second =
        create_with_settings(&SamplerConfig::for_provider("claude"), &Settings::default()).unwrap();

    assert_eq!(first.model(), "claude-3-5-haiku-latest");
    assert_eq!(second.model(), "claude-sonnet-4-20250514");
}

#[tokio::test]
async fn test_environment_credential_and_base_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("x-api-key", "sk-ant-env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "claude-sonnet-4-20250514",
            "content": [{"type": "text", "text": "from env"}],
            "usage": {"input_tokens": 1, "output_tokens": 2}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = Settings {
        anthropic: ProviderSettings {
            api_key: Some(SecretString::new("sk-ant-env")),
            base_url: Some(mock_server.uri()),
        },
        ..Default::default()
    };

    let sampler = create_with_settings(&SamplerConfig::for_provider("claude"), &settings).unwrap();
    let response = sampler
        .chat(&ChatRequest::new(vec![ChatMessage::user("Hi")]))
        .await
        .unwrap();
    assert_eq!(response.text, "from env");
}

#[tokio::test]
async fn test_explicit_key_beats_environment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-explicit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "ok"}, "finish_reason": "stop"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = Settings {
        openai: ProviderSettings {
            api_key: Some(SecretString::new("sk-env")),
            base_url: None,
        },
        ..Default::default()
    };
    let config = SamplerConfig::for_provider("openai")
        .with_api_key("sk-explicit")
        .with_base_url(mock_server.uri());

    let sampler = create_with_settings(&config, &settings).unwrap();
    let response = sampler
        .chat(&ChatRequest::new(vec![ChatMessage::user("Hi")]))
        .await
        .unwrap();
    assert_eq!(response.text, "ok");
    assert_eq!(response.usage.input_tokens, None);
}
