//! OpenAI client tests against a throwaway local server on a random port.

use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use notemind::config::LlmConfig;
use notemind::llm::openai::OpenAiProvider;
use notemind::llm::{AudioClip, CompletionProvider, CompletionRequest, LlmError};
use serde_json::{json, Value};

/// Serve `router` on 127.0.0.1:0 and return the base URL (with `/v1`).
async fn start_fake_service(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v1")
}

fn provider(base_url: String) -> OpenAiProvider {
    let config = LlmConfig {
        base_url,
        api_key: "sk-test".to_string(),
        request_timeout_secs: 5,
        ..LlmConfig::default()
    };
    OpenAiProvider::new(&config).unwrap()
}

fn request(user_content: &str) -> CompletionRequest {
    CompletionRequest {
        system_instruction: "Answer from the notes.".to_string(),
        user_content: user_content.to_string(),
        max_output_tokens: 64,
        temperature: 0.0,
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer sk-test")
}

/// Echoes the model and user message back as the assistant reply.
async fn echo_chat(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "no key"})));
    }
    let reply = format!(
        "{} saw: {} (max_tokens={})",
        body["model"].as_str().unwrap_or_default(),
        body["messages"][1]["content"].as_str().unwrap_or_default(),
        body["max_tokens"]
    );
    (
        StatusCode::OK,
        Json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": reply}, "finish_reason": "stop"}]
        })),
    )
}

async fn fake_transcription(
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "no key"})));
    }
    let mut model = String::new();
    let mut file_len = 0;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("model") => model = field.text().await.unwrap(),
            Some("file") => file_len = field.bytes().await.unwrap().len(),
            _ => {}
        }
    }
    (
        StatusCode::OK,
        Json(json!({"text": format!("{file_len} bytes via {model}")})),
    )
}

#[tokio::test]
async fn complete_posts_chat_request_and_returns_first_choice() {
    let base =
        start_fake_service(Router::new().route("/v1/chat/completions", post(echo_chat))).await;
    let client = provider(base);

    let reply = client.complete(request("Question: milk?")).await.unwrap();
    assert_eq!(reply, "gpt-4o-mini saw: Question: milk? (max_tokens=64)");
}

#[tokio::test]
async fn complete_surfaces_api_errors() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
    );
    let client = provider(start_fake_service(router).await);

    let err = client.complete(request("hi")).await.unwrap_err();
    match err {
        LlmError::Api { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn complete_rejects_empty_choices() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let client = provider(start_fake_service(router).await);

    let err = client.complete(request("hi")).await.unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}

#[tokio::test]
async fn complete_reports_malformed_body() {
    let router = Router::new().route("/v1/chat/completions", post(|| async { "not json" }));
    let client = provider(start_fake_service(router).await);

    let err = client.complete(request("hi")).await.unwrap_err();
    assert!(matches!(err, LlmError::Parse(_)));
}

#[tokio::test]
async fn unreachable_service_is_a_request_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = provider(format!("http://{addr}/v1"));
    let err = client.complete(request("hi")).await.unwrap_err();
    assert!(matches!(err, LlmError::Request(_)));
}

#[tokio::test]
async fn transcribe_uploads_multipart_file() {
    let base = start_fake_service(
        Router::new().route("/v1/audio/transcriptions", post(fake_transcription)),
    )
    .await;
    let client = provider(base);

    let text = client
        .transcribe(AudioClip {
            file_name: "memo.wav".to_string(),
            content_type: "audio/wav".to_string(),
            bytes: vec![1, 2, 3, 4, 5],
        })
        .await
        .unwrap();
    assert_eq!(text, "5 bytes via whisper-1");
}
