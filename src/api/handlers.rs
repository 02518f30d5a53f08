//! Route handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::info;

use crate::api::models::{
    AnalyzeRequest, AnalyzeResponse, ChatRequest, ChatResponse, HealthResponse,
};
use crate::error::{AppError, Result};
use crate::AppState;

const ANALYZE_FAILED: &str = "Failed to analyze image";
const CHAT_FAILED: &str = "Failed to process chat message";

/// Treat absent and blank strings alike
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn missing_field(name: &str) -> AppError {
    AppError::InvalidRequest(format!("Missing required field: {}", name))
}

/// `POST /analyze`
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>> {
    let Json(request) = payload?;
    let image = present(request.image_base64).ok_or_else(|| missing_field("imageBase64"))?;
    let plant_type = present(request.plant_type);

    let outcome = state
        .analysis
        .analyze(&image, plant_type.as_deref())
        .await
        .map_err(|e| e.in_request(ANALYZE_FAILED))?;

    info!(
        diagnosis = %outcome.result.diagnosis,
        confidence = outcome.result.confidence,
        pinned = outcome.image_cid.is_some(),
        "Image analyzed"
    );

    Ok(Json(outcome.into()))
}

/// `POST /chat`
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(request) = payload?;
    let message = present(request.message).ok_or_else(|| missing_field("message"))?;
    let context = present(request.context);

    let response = state
        .chat
        .reply(&message, context.as_deref())
        .await
        .map_err(|e| e.in_request(CHAT_FAILED))?;

    Ok(Json(ChatResponse { response }))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
