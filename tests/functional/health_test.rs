//! Functional tests for GET /health

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use chrono::DateTime;

use crate::support::{app, send};

#[tokio::test]
async fn test_health_reports_ok() {
    let (status, body) = send(
        app(None, None),
        Request::builder()
            .method(Method::GET)
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(timestamp.ends_with('Z'));
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, _) = send(
        app(None, None),
        Request::builder()
            .method(Method::GET)
            .uri("/diagnose")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight_is_answered() {
    let response = tower::ServiceExt::oneshot(
        app(None, None),
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/analyze")
            .header("origin", "http://localhost:8081")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
