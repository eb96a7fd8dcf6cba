//! End-to-end tests for `BedrockClient` against a local stand-in provider.

use std::net::SocketAddr;

use assert_matches::assert_matches;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use microlearn_generation::messages::InferenceConfig;
use microlearn_generation::{BedrockClient, GenerationConfig, GenerationError, TextGenerator};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Serve `app` on an ephemeral local port and return its address.
async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config_for(addr: SocketAddr, api_key: Option<&str>) -> GenerationConfig {
    GenerationConfig {
        endpoint: format!("http://{addr}"),
        model_id: "test-model".to_string(),
        api_key: api_key.map(str::to_string),
        inference: InferenceConfig {
            max_tokens: 256,
            temperature: 0.2,
        },
        daily_max_tokens: 128,
        timeout_secs: 5,
    }
}

/// Echoes the prompt back as the completion, after checking the request.
async fn echo_converse(
    Path(model_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer secret");
    if !authorized {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "message": "The security token included in the request is invalid." })),
        );
    }

    let prompt = body["messages"][0]["content"][0]["text"].clone();
    (
        StatusCode::OK,
        Json(json!({
            "output": { "message": { "role": "assistant", "content": [{ "text": prompt }] } },
            "stopReason": "end_turn",
            "usage": { "inputTokens": 3, "outputTokens": 3, "totalTokens": 6 },
            "model": model_id,
            "maxTokens": body["inferenceConfig"]["maxTokens"],
        })),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_returns_first_completion_text() {
    let addr = serve(Router::new().route("/model/{model_id}/converse", post(echo_converse))).await;
    let client = BedrockClient::new(&config_for(addr, Some("secret"))).unwrap();

    let text = client.generate("make me a lesson").await.unwrap();

    assert_eq!(text, "make me a lesson");
}

#[tokio::test]
async fn converse_sends_model_and_inference_config() {
    let addr = serve(Router::new().route("/model/{model_id}/converse", post(echo_converse))).await;
    let client = BedrockClient::new(&config_for(addr, Some("secret"))).unwrap();

    let body = client.converse("hi").await.unwrap();

    assert_eq!(body["model"], "test-model");
    assert_eq!(body["maxTokens"], 256);
}

#[tokio::test]
async fn rejected_credentials_surface_as_api_error() {
    let addr = serve(Router::new().route("/model/{model_id}/converse", post(echo_converse))).await;
    let client = BedrockClient::new(&config_for(addr, None)).unwrap();

    let err = client.generate("hi").await.unwrap_err();

    assert_matches!(
        err,
        GenerationError::Api { status: 403, ref body } if body.contains("security token")
    );
}

#[tokio::test]
async fn missing_completion_path_is_malformed_response() {
    let app = Router::new().route(
        "/model/{model_id}/converse",
        post(|| async { Json(json!({ "output": { "message": { "content": [] } } })) }),
    );
    let addr = serve(app).await;
    let client = BedrockClient::new(&config_for(addr, None)).unwrap();

    let err = client.generate("hi").await.unwrap_err();

    assert_matches!(err, GenerationError::MalformedResponse(_));
}

#[tokio::test]
async fn unreachable_provider_is_request_error() {
    // Bind then drop a listener so the port is very likely closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BedrockClient::new(&config_for(addr, None)).unwrap();
    let err = client.generate("hi").await.unwrap_err();

    assert_matches!(err, GenerationError::Request(_));
}
