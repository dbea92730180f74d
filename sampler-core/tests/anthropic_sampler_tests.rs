//! Anthropic sampler tests against a mocked Messages API

use futures::StreamExt;
use sampler_core::providers::{create_with_settings, ChatSampler, ProviderError};
use sampler_core::{
    ChatMessage, ChatRequest, ContentPart, ProviderKind, Role, Sampler, SamplerConfig, Settings,
};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sampler(base_url: &str) -> Sampler {
    let config = SamplerConfig::for_provider("claude")
        .with_api_key("test-key")
        .with_base_url(base_url);
    create_with_settings(&config, &Settings::default()).expect("Failed to create sampler")
}

fn hello_request() -> ChatRequest {
    ChatRequest::new(vec![ChatMessage::user("Hello")]).with_system_prompt("Be brief.")
}

fn message(content: Value) -> Value {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "model": "claude-sonnet-4-20250514",
        "content": content,
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 20, "output_tokens": 5}
    })
}

/// Encode `(event, data)` pairs as an SSE body
fn sse(events: &[(&str, Value)]) -> String {
    events
        .iter()
        .map(|(name, data)| format!("event: {}\ndata: {}\n\n", name, data))
        .collect()
}

fn text_delta(text: &str) -> (&'static str, Value) {
    (
        "content_block_delta",
        json!({"type": "content_block_delta", "index": 0, "delta": {"type": "text_delta", "text": text}}),
    )
}

fn framing_start() -> Vec<(&'static str, Value)> {
    vec![
        (
            "message_start",
            json!({"type": "message_start", "message": {"id": "msg_01", "content": [], "usage": {"input_tokens": 20}}}),
        ),
        (
            "content_block_start",
            json!({"type": "content_block_start", "index": 0, "content_block": {"type": "text", "text": ""}}),
        ),
        ("ping", json!({"type": "ping"})),
    ]
}

fn framing_end() -> Vec<(&'static str, Value)> {
    vec![
        ("content_block_stop", json!({"type": "content_block_stop", "index": 0})),
        (
            "message_delta",
            json!({"type": "message_delta", "delta": {"stop_reason": "end_turn"}, "usage": {"output_tokens": 5}}),
        ),
        ("message_stop", json!({"type": "message_stop"})),
    ]
}

async fn mount_stream(server: &MockServer, body: String) {
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_chat_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(message(json!([{"type": "text", "text": "Hello!"}]))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let sampler = sampler(&mock_server.uri());
    assert_eq!(sampler.kind(), ProviderKind::Anthropic);

    let response = sampler.chat(&hello_request()).await.unwrap();
    assert_eq!(response.text, "Hello!");
    assert_eq!(response.model, "claude-sonnet-4-20250514");
    assert_eq!(response.usage.input_tokens, Some(20));
    assert_eq!(response.usage.output_tokens, Some(5));
    assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
    assert_eq!(response.raw["id"], "msg_01");
}

#[tokio::test]
async fn test_chat_wire_format() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(message(json!([{"type": "text", "text": "ok"}]))),
        )
        .mount(&mock_server)
        .await;

    let sampler = sampler(&mock_server.uri());
    let request = ChatRequest::new(vec![
        ChatMessage::user("First"),
        ChatMessage::assistant("Second"),
        ChatMessage::user("Third"),
    ])
    .with_system_prompt("Be brief.");
    sampler.chat(&request).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();

    assert_eq!(body["model"], "claude-sonnet-4-20250514");
    assert_eq!(body["max_tokens"], 1024);
    assert_eq!(body["system"], "Be brief.");
    assert!(body.get("stream").is_none());
    assert_eq!(
        body["messages"],
        json!([
            {"role": "user", "content": "First"},
            {"role": "assistant", "content": "Second"},
            {"role": "user", "content": "Third"}
        ])
    );
}

#[tokio::test]
async fn test_empty_system_prompt_is_omitted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(message(json!([{"type": "text", "text": "ok"}]))),
        )
        .mount(&mock_server)
        .await;

    let sampler = sampler(&mock_server.uri());
    sampler
        .chat(&ChatRequest::new(vec![ChatMessage::user("Hello")]))
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert!(body.get("system").is_none());
}

#[tokio::test]
async fn test_image_parts_are_translated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(message(
            json!([{"type": "text", "text": "A cat."}]),
        )))
        .mount(&mock_server)
        .await;

    let sampler = sampler(&mock_server.uri());
    let request = ChatRequest::new(vec![ChatMessage::with_parts(
        Role::User,
        vec![
            ContentPart::text("What is this?"),
            ContentPart::image(vec![0xFF, 0xD8, 0xFF], "image/jpeg"),
            ContentPart::image_url("https://example.com/cat.png"),
            ContentPart::image_url("data:image/svg+xml;charset=utf-8,%3Csvg%3E"),
        ],
    )]);
    let response = sampler.chat(&request).await.unwrap();
    assert_eq!(response.text, "A cat.");

    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(
        body["messages"][0]["content"],
        json!([
            {"type": "text", "text": "What is this?"},
            {"type": "image", "source": {"type": "base64", "media_type": "image/jpeg", "data": "/9j/"}},
            {"type": "image", "source": {"type": "url", "url": "https://example.com/cat.png"}},
            {"type": "image", "source": {"type": "base64", "media_type": "image/svg+xml", "data": "PHN2Zz4="}}
        ])
    );
}

#[tokio::test]
async fn test_non_text_blocks_are_ignored() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(message(json!([
            {"type": "text", "text": "Let me check. "},
            {"type": "tool_use", "id": "toolu_01", "name": "lookup", "input": {"q": "x"}},
            {"type": "text", "text": "Done."}
        ]))))
        .mount(&mock_server)
        .await;

    let sampler = sampler(&mock_server.uri());
    let response = sampler.chat(&hello_request()).await.unwrap();
    assert_eq!(response.text, "Let me check. Done.");
}

#[tokio::test]
async fn test_overloaded_is_service_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_json(json!({
            "type": "error",
            "error": {"type": "overloaded_error", "message": "Overloaded"}
        })))
        .mount(&mock_server)
        .await;

    let sampler = sampler(&mock_server.uri());
    let err = sampler.chat(&hello_request()).await.unwrap_err();
    assert!(matches!(
        err.provider_error(),
        Some(ProviderError::ServiceUnavailable(_))
    ));
}

#[tokio::test]
async fn test_stream_skips_framing_events() {
    let mock_server = MockServer::start().await;

    let mut events = framing_start();
    events.extend([text_delta("1, 2"), text_delta(", 3")]);
    events.extend(framing_end());
    mount_stream(&mock_server, sse(&events)).await;

    let sampler = sampler(&mock_server.uri());
    let fragments: Vec<String> = sampler
        .chat_stream(&hello_request())
        .await
        .unwrap()
        .map(|fragment| fragment.unwrap())
        .collect()
        .await;

    assert_eq!(fragments, vec!["1, 2", ", 3"]);

    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["stream"], true);
    assert_eq!(body["system"], "Be brief.");
}

#[tokio::test]
async fn test_stream_error_after_fragments() {
    let mock_server = MockServer::start().await;

    let mut events = framing_start();
    events.extend([text_delta("one"), text_delta("two")]);
    events.push((
        "error",
        json!({"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}}),
    ));
    events.push(text_delta("three"));
    mount_stream(&mock_server, sse(&events)).await;

    let sampler = sampler(&mock_server.uri());
    let items: Vec<_> = sampler
        .chat_stream(&hello_request())
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].as_ref().unwrap(), "one");
    assert_eq!(items[1].as_ref().unwrap(), "two");
    match &items[2] {
        Err(err) => assert!(matches!(
            err.provider_error(),
            Some(ProviderError::ServiceUnavailable(_))
        )),
        Ok(text) => panic!("Expected error, got fragment {:?}", text),
    }
}

#[tokio::test]
async fn test_stream_without_text() {
    let mock_server = MockServer::start().await;

    let mut events = framing_start();
    events.extend(framing_end());
    mount_stream(&mock_server, sse(&events)).await;

    let sampler = sampler(&mock_server.uri());
    let items: Vec<_> = sampler
        .chat_stream(&hello_request())
        .await
        .unwrap()
        .collect()
        .await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_concurrent_calls_share_sampler() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(message(json!([{"type": "text", "text": "hi"}]))),
        )
        .expect(4)
        .mount(&mock_server)
        .await;

    let sampler = std::sync::Arc::new(sampler(&mock_server.uri()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let sampler = sampler.clone();
            tokio::spawn(async move { sampler.chat(&hello_request()).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().text, "hi");
    }
}
