//! NFT.Storage blob pinning client

use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::backend::traits::{Blob, BlobStore};
use crate::config::StorageConfig;
use crate::error::{AppError, Result};

/// Pins blobs through the NFT.Storage `/upload` endpoint
pub struct NftStorageBackend {
    client: Client,
    endpoint: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    value: Option<UploadValue>,
    #[serde(default)]
    error: Option<UploadError>,
}

#[derive(Debug, Deserialize)]
struct UploadValue {
    cid: String,
}

#[derive(Debug, Deserialize)]
struct UploadError {
    #[serde(default)]
    message: Option<String>,
}

impl NftStorageBackend {
    pub fn new(config: &StorageConfig, token: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl BlobStore for NftStorageBackend {
    fn name(&self) -> &str {
        "nft_storage"
    }

    async fn store_blob(&self, blob: Blob) -> Result<String> {
        let size = blob.data.len();
        let part = multipart::Part::bytes(blob.data)
            .file_name(blob.file_name)
            .mime_str(&blob.mime_type)?;
        let form = multipart::Form::new().part("file", part);

        debug!(endpoint = %self.endpoint, size, "Uploading blob to NFT.Storage");

        let response = self
            .client
            .post(format!("{}/upload", self.endpoint))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: Option<UploadResponse> = serde_json::from_str(&body).ok();

        match parsed {
            Some(UploadResponse {
                ok: true,
                value: Some(value),
                ..
            }) if status.is_success() => Ok(value.cid),
            Some(UploadResponse {
                error: Some(UploadError { message: Some(message) }),
                ..
            }) => Err(AppError::BackendError(format!("{} ({})", message, status))),
            _ => Err(AppError::BackendError(format!("Storage returned {}: {}", status, body))),
        }
    }
}
