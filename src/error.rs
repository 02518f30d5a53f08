//! Common error types for the gateway

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0} not configured")]
    NotConfigured(&'static str),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("IPFS upload failed: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// An error raised while serving a route, labelled with what the route was doing
    #[error("{label}: {source}")]
    Request {
        label: &'static str,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Label a failure with the route-level description reported to clients.
    /// Client errors are left untouched so they keep their 400 shape.
    pub fn in_request(self, label: &'static str) -> Self {
        match self {
            AppError::InvalidRequest(_) | AppError::PayloadTooLarge(_) | AppError::Request { .. } => {
                self
            }
            other => AppError::Request {
                label,
                source: Box::new(other),
            },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        AppError::InvalidRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

/// Error response body: `{ "error": ..., "message": ... }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    message: None,
                },
            ),
            AppError::PayloadTooLarge(message) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorResponse {
                    error: message,
                    message: None,
                },
            ),
            AppError::Request { label, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: label.to_string(),
                    message: Some(source.to_string()),
                },
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    message: Some(other.to_string()),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
