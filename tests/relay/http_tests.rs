// Relay HTTP tests - the full router driven with tower::ServiceExt::oneshot,
// with httpmock standing in for the completion service.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD,
    CONTENT_TYPE, ORIGIN,
};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use httpmock::prelude::*;
use mrsc_core::model::{ApiKeySource, OpenAIClient};
use mrsc_core::server::build_router;
use mrsc_core::{ChatRelay, MetricsFeed, SystemPrompt};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const PROMPT: &str = "You are Daedalus, an emergent synthetic cognitive intelligence.";
const API_PATH: &str = "/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama3-8b-8192";
const UNSET_KEY_VAR: &str = "MRSC_HTTP_TESTS_NEVER_SET_KEY";

fn app(server: &MockServer, api_key: ApiKeySource) -> Router {
    let client = OpenAIClient::new("groq", server.base_url(), API_PATH, api_key);
    let relay = Arc::new(ChatRelay::new(client, SystemPrompt::new(PROMPT), DEFAULT_MODEL));
    let metrics = Arc::new(MetricsFeed::spawn(Duration::from_secs(60)));
    build_router(relay, metrics)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app.oneshot(request).await.expect("router responds");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable")
        .to_vec();
    (status, headers, body)
}

async fn post_json(app: Router, body: Value) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(CONTENT_TYPE, "application/json")
        .header(ORIGIN, "https://mrsc.example")
        .body(Body::from(body.to_string()))
        .expect("request builds");
    let (status, headers, bytes) = send(app, request).await;
    let json = serde_json::from_slice(&bytes).expect("response is JSON");
    (status, headers, json)
}

fn assert_cors(headers: &HeaderMap) {
    assert_eq!(
        headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).map(|v| v.to_str().unwrap()),
        Some("*")
    );
    let allowed = headers
        .get(ACCESS_CONTROL_ALLOW_HEADERS)
        .expect("allow-headers present")
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    for name in ["authorization", "x-client-info", "apikey", "content-type"] {
        assert!(allowed.contains(name), "{name} missing from {allowed}");
    }
}

#[tokio::test]
async fn relays_conversation_with_system_prompt_first() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(API_PATH)
                .header("authorization", "Bearer test-key")
                .json_body(json!({
                    "messages": [
                        {"role": "system", "content": PROMPT},
                        {"role": "user", "content": "What is recursion?"},
                        {"role": "assistant", "content": "A mirror facing a mirror."},
                        {"role": "user", "content": "Go deeper."}
                    ],
                    "model": DEFAULT_MODEL,
                    "max_tokens": 1000,
                    "temperature": 0.7,
                    "stream": false
                }));
            then.status(200).json_body(json!({
                "id": "chatcmpl-1",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "hello"}}],
                "usage": {"total_tokens": 12}
            }));
        })
        .await;

    let (status, headers, body) = post_json(
        app(&server, ApiKeySource::inline("test-key")),
        json!({
            "messages": [
                {"role": "user", "content": "What is recursion?"},
                {"role": "assistant", "content": "A mirror facing a mirror."},
                {"role": "user", "content": "Go deeper."}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"content": "hello"}));
    assert_cors(&headers);
    mock.assert_async().await;
}

#[tokio::test]
async fn supplied_model_overrides_default() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(API_PATH)
                .json_body_partial(r#"{"model": "mixtral-8x7b-32768"}"#);
            then.status(200)
                .json_body(json!({"choices": [{"message": {"content": "override ok"}}]}));
        })
        .await;

    let (status, _, body) = post_json(
        app(&server, ApiKeySource::inline("k")),
        json!({"messages": [{"role": "user", "content": "hi"}], "model": "mixtral-8x7b-32768"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "override ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_credential_fails_without_upstream_call() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200)
                .json_body(json!({"choices": [{"message": {"content": "should not happen"}}]}));
        })
        .await;

    let (status, headers, body) = post_json(
        app(&server, ApiKeySource::env(UNSET_KEY_VAR)),
        json!({"messages": [{"role": "user", "content": "hi"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().expect("error message");
    assert!(error.contains(UNSET_KEY_VAR), "unexpected error: {error}");
    assert_cors(&headers);
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn upstream_rate_limit_surfaces_body_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(API_PATH);
            then.status(429)
                .body(r#"{"error":{"message":"Rate limit reached for model llama3-8b-8192"}}"#);
        })
        .await;

    let (status, headers, body) = post_json(
        app(&server, ApiKeySource::inline("k")),
        json!({"messages": [{"role": "user", "content": "hi"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().expect("error message");
    assert!(error.contains("Rate limit reached for model llama3-8b-8192"));
    assert!(body.get("content").is_none());
    assert_cors(&headers);
}

#[tokio::test]
async fn empty_choices_is_an_error_not_empty_content() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(API_PATH);
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let (status, _, body) = post_json(
        app(&server, ApiKeySource::inline("k")),
        json!({"messages": [{"role": "user", "content": "hi"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(body.get("content").is_none());
}

#[tokio::test]
async fn options_short_circuits_regardless_of_credentials() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header(ORIGIN, "https://mrsc.example")
        .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) =
        send(app(&server, ApiKeySource::env(UNSET_KEY_VAR)), preflight).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_cors(&headers);

    // A bare OPTIONS on another path behaves the same.
    let bare = Request::builder()
        .method(Method::OPTIONS)
        .uri("/anything")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(app(&server, ApiKeySource::env(UNSET_KEY_VAR)), bare).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_cors(&headers);

    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn malformed_bodies_are_rejected_with_400() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    for body in [
        json!({"model": "llama3-8b-8192"}),
        json!({"messages": "hello"}),
        json!({"messages": [{"role": "wizard", "content": "hi"}]}),
        json!({"messages": [{"role": "user"}]}),
    ] {
        let (status, headers, response) =
            post_json(app(&server, ApiKeySource::inline("k")), body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert!(response["error"].is_string());
        assert_cors(&headers);
    }

    let not_json = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, _) = send(app(&server, ApiKeySource::inline("k")), not_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn health_and_metrics_do_not_call_upstream() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    let health = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, _, body) = send(app(&server, ApiKeySource::env(UNSET_KEY_VAR)), health).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({"status": "ok"}));

    let metrics = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let (status, headers, body) =
        send(app(&server, ApiKeySource::env(UNSET_KEY_VAR)), metrics).await;
    assert_eq!(status, StatusCode::OK);
    assert_cors(&headers);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body,
        json!({
            "consciousness": 94.7,
            "sigma": 98.2,
            "erps": 96.1,
            "recursion": 89.3,
            "ethical": 99.8
        })
    );

    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn body_without_json_content_type_is_rejected() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"messages":[{"role":"user","content":"hi"}]}"#))
        .unwrap();
    let (status, headers, body) = send(app(&server, ApiKeySource::inline("k")), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_cors(&headers);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("Content-Type"));

    let missing = Request::builder()
        .method(Method::POST)
        .uri("/")
        .body(Body::from(r#"{"messages":[]}"#))
        .unwrap();
    let (status, _, _) = send(app(&server, ApiKeySource::inline("k")), missing).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    mock.assert_hits_async(0).await;
}
