//! Pinata pinning client, an alternative IPFS provider

use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::backend::traits::{Blob, BlobStore};
use crate::config::StorageConfig;
use crate::error::{AppError, Result};

/// Pins blobs through Pinata's `pinFileToIPFS` endpoint
pub struct PinataBackend {
    client: Client,
    endpoint: String,
    api_key: String,
    secret_key: String,
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

impl PinataBackend {
    pub fn new(config: &StorageConfig, api_key: &str, secret_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            api_key: api_key.to_string(),
            secret_key: secret_key.to_string(),
        })
    }
}

#[async_trait]
impl BlobStore for PinataBackend {
    fn name(&self) -> &str {
        "pinata"
    }

    async fn store_blob(&self, blob: Blob) -> Result<String> {
        let size = blob.data.len();
        let part = multipart::Part::bytes(blob.data)
            .file_name(blob.file_name)
            .mime_str(&blob.mime_type)?;
        let form = multipart::Form::new().part("file", part);

        debug!(endpoint = %self.endpoint, size, "Pinning blob with Pinata");

        let response = self
            .client
            .post(format!("{}/pinning/pinFileToIPFS", self.endpoint))
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.secret_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::BackendError(format!(
                "Storage returned {}: {}",
                status, body
            )));
        }

        let pinned: PinResponse = response
            .json()
            .await
            .map_err(|e| AppError::BackendError(format!("Failed to parse response: {}", e)))?;

        Ok(pinned.ipfs_hash)
    }
}
