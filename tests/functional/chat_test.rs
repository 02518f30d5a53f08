//! Functional tests for POST /chat

use agriscan_gateway::gateway::chat::CHAT_UNAVAILABLE;
use axum::http::StatusCode;
use serde_json::json;

use crate::support::{app, post_json, StubModel};

#[tokio::test]
async fn test_missing_message_is_rejected() {
    let (status, body) = post_json(app(None, None), "/chat", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: message");
}

#[tokio::test]
async fn test_blank_message_is_rejected() {
    let (status, _) = post_json(app(None, None), "/chat", json!({ "message": "   " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_apology_without_model_credential() {
    let (status, body) = post_json(
        app(None, None),
        "/chat",
        json!({ "message": "How do I treat leaf rust?" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], CHAT_UNAVAILABLE);
}

#[tokio::test]
async fn test_model_answer_is_returned_verbatim() {
    let answer = "Remove infected leaves and spray a copper-based fungicide every 10 days.";
    let model = StubModel::answering(answer);

    let (status, body) = post_json(
        app(Some(model.clone()), None),
        "/chat",
        json!({ "message": "How do I treat leaf rust?", "context": "Coffee Leaf Rust" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], answer);

    let requests = model.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].image.is_none());
    assert!(!requests[0].json_output);
    assert!(requests[0]
        .prompt
        .contains("Context: The farmer is currently dealing with: Coffee Leaf Rust"));
    assert!(requests[0]
        .prompt
        .contains("User question: How do I treat leaf rust?"));
}

#[tokio::test]
async fn test_prompt_without_context() {
    let model = StubModel::answering("Plant after the first rains.");

    let (status, _) = post_json(
        app(Some(model.clone()), None),
        "/chat",
        json!({ "message": "When should I plant maize?" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let requests = model.requests.lock().unwrap();
    assert!(!requests[0].prompt.contains("Context:"));
}

#[tokio::test]
async fn test_model_failure_is_an_error() {
    let (status, body) = post_json(
        app(Some(StubModel::failing("quota exceeded")), None),
        "/chat",
        json!({ "message": "Hello" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to process chat message");
    assert_eq!(body["message"], "Model error: quota exceeded");
}
