//! Functional tests for POST /analyze

use agriscan_gateway::config::Settings;
use agriscan_gateway::diagnosis::ANALYSIS_APOLOGY;
use agriscan_gateway::gateway::uploader::{UPLOAD_FILE_NAME, UPLOAD_MIME_TYPE};
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
};
use serde_json::json;

use crate::support::{app, app_with_settings, post_json, send, StubModel, StubStore, SAMPLE_IMAGE};

const VALID_DIAGNOSES: [&str; 3] = ["Healthy", "Mild Disease", "Severe Disease"];

#[tokio::test]
async fn test_empty_body_is_rejected() {
    let (status, body) = post_json(app(None, None), "/analyze", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: imageBase64");
}

#[tokio::test]
async fn test_non_data_uri_is_rejected() {
    let (status, body) = post_json(
        app(None, None),
        "/analyze",
        json!({ "imageBase64": "not-a-data-uri" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid image format. Expected data URI with base64");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let (status, body) = send(
        app(None, None),
        Request::builder()
            .method(Method::POST)
            .uri("/analyze")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{\"imageBase64\": "))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_mock_mode_without_model_credential() {
    for _ in 0..10 {
        let (status, body) = post_json(
            app(None, None),
            "/analyze",
            json!({ "imageBase64": SAMPLE_IMAGE }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(VALID_DIAGNOSES.contains(&body["diagnosis"].as_str().unwrap()));
        let confidence = body["confidence"].as_f64().unwrap();
        assert!((0.6..=0.9).contains(&confidence));
        assert!(body["imageCid"].is_null());
        assert_eq!(body["identifiedSubject"], "Unknown");
        assert_eq!(body["reasoning"], ANALYSIS_APOLOGY);
    }
}

#[tokio::test]
async fn test_model_answer_is_normalized() {
    let model = StubModel::answering(
        r#"```json
{"diagnosis": "Early Blight (mild)", "confidence": 1.4, "reasoning": "Concentric rings on lower leaves", "diseaseName": "Early Blight", "preventionTips": ["Mulch", "Remove lower leaves"]}
```"#,
    );

    let (status, body) = post_json(
        app(Some(model.clone()), None),
        "/analyze",
        json!({ "imageBase64": SAMPLE_IMAGE, "plantType": "Tomato" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["diagnosis"], "Mild Disease");
    assert_eq!(body["confidence"], 1.0);
    assert_eq!(body["identifiedSubject"], "Tomato");
    assert_eq!(body["reasoning"], "Concentric rings on lower leaves");
    assert_eq!(body["diseaseName"], "Early Blight");
    assert_eq!(body["diseaseDescription"], "");
    assert_eq!(body["preventionTips"], "Mulch\nRemove lower leaves");
    assert_eq!(body["severity"], "");
    assert!(body["imageCid"].is_null());

    let requests = model.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let image = requests[0].image.as_ref().expect("image sent to model");
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.data, b"Hello, World!".to_vec());
    assert!(requests[0].prompt.contains("The subject type is: Tomato."));
}

#[tokio::test]
async fn test_model_failure_falls_back() {
    let (status, body) = post_json(
        app(Some(StubModel::failing("upstream exploded")), None),
        "/analyze",
        json!({ "imageBase64": SAMPLE_IMAGE, "plantType": "Maize" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["diagnosis"], "Healthy");
    assert_eq!(body["confidence"], 0.5);
    assert_eq!(body["reasoning"], ANALYSIS_APOLOGY);
    assert_eq!(body["identifiedSubject"], "Maize");
    assert_eq!(body["diseaseName"], "None");
}

#[tokio::test]
async fn test_model_failure_surfaces_when_fallback_disabled() {
    let mut settings = Settings::default();
    settings.analysis.fallback_on_error = false;

    let (status, body) = post_json(
        app_with_settings(settings, Some(StubModel::failing("upstream exploded")), None),
        "/analyze",
        json!({ "imageBase64": SAMPLE_IMAGE }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to analyze image");
    assert_eq!(body["message"], "Model error: upstream exploded");
}

#[tokio::test]
async fn test_reasoning_leak_is_scrubbed() {
    let model = StubModel::answering(
        r#"{"diagnosis": "Healthy", "confidence": 0.9, "reasoning": "This is mock data. Set GEMINI_API_KEY to analyze for real."}"#,
    );

    let (_, body) = post_json(
        app(Some(model), None),
        "/analyze",
        json!({ "imageBase64": SAMPLE_IMAGE }),
    )
    .await;

    let reasoning = body["reasoning"].as_str().unwrap();
    assert!(!reasoning.to_lowercase().contains("gemini_api_key"));
    assert_eq!(reasoning, ANALYSIS_APOLOGY);
}

#[tokio::test]
async fn test_image_is_pinned_when_storage_configured() {
    let store = StubStore::pinning("bafkreigh2akiscaildc");

    let (status, body) = post_json(
        app(Some(StubModel::answering(r#"{"diagnosis": "Healthy"}"#)), Some(store.clone())),
        "/analyze",
        json!({ "imageBase64": SAMPLE_IMAGE }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageCid"], "bafkreigh2akiscaildc");

    let blobs = store.blobs.lock().unwrap();
    assert_eq!(blobs.len(), 1);
    assert_eq!(blobs[0].file_name, UPLOAD_FILE_NAME);
    assert_eq!(blobs[0].mime_type, UPLOAD_MIME_TYPE);
    assert_eq!(blobs[0].data, b"Hello, World!".to_vec());
}

#[tokio::test]
async fn test_upload_failure_is_swallowed() {
    let (status, body) = post_json(
        app(Some(StubModel::answering(r#"{"diagnosis": "Severe"}"#)), Some(StubStore::failing())),
        "/analyze",
        json!({ "imageBase64": SAMPLE_IMAGE }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["diagnosis"], "Severe Disease");
    assert_eq!(body["diseaseName"], "Unknown Disease");
    assert!(body["imageCid"].is_null());
}

#[tokio::test]
async fn test_no_storage_means_no_cid_even_after_model_success() {
    let (status, body) = post_json(
        app(Some(StubModel::answering(r#"{"diagnosis": "Healthy", "confidence": 0.99}"#)), None),
        "/analyze",
        json!({ "imageBase64": SAMPLE_IMAGE }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_object().unwrap().contains_key("imageCid"));
    assert!(body["imageCid"].is_null());
}

#[tokio::test]
async fn test_body_limit_is_enforced() {
    let mut settings = Settings::default();
    settings.server.body_limit_bytes = 64;

    let (status, _) = post_json(
        app_with_settings(settings, None, None),
        "/analyze",
        json!({ "imageBase64": format!("{}{}", SAMPLE_IMAGE, "A".repeat(256)) }),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
