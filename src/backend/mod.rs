//! Backend module - Traits and HTTP clients for the model and IPFS providers

pub mod gemini;
pub mod nft_storage;
pub mod pinata;
pub mod traits;

use std::sync::Arc;
use tracing::info;

use crate::config::{GeminiConfig, StorageConfig, StorageProvider};
use crate::error::{AppError, Result};

pub use gemini::GeminiBackend;
pub use nft_storage::NftStorageBackend;
pub use pinata::PinataBackend;
pub use traits::{Blob, BlobStore, GenerateRequest, GenerativeModel, InlineImage};

/// Build the model backend, or `None` when no API key is configured
pub fn model_from_config(config: &GeminiConfig) -> Result<Option<Arc<dyn GenerativeModel>>> {
    let Some(api_key) = config.api_key() else {
        return Ok(None);
    };

    let backend = GeminiBackend::new(config, api_key)?;
    info!(
        vision_model = %config.vision_model,
        text_model = %config.text_model,
        "Registered Gemini backend"
    );
    Ok(Some(Arc::new(backend)))
}

/// Build the blob store for the configured provider, or `None` when no API
/// key is configured
pub fn blob_store_from_config(config: &StorageConfig) -> Result<Option<Arc<dyn BlobStore>>> {
    let Some(api_key) = config.api_key() else {
        return Ok(None);
    };

    let store: Arc<dyn BlobStore> = match config.provider {
        StorageProvider::NftStorage => Arc::new(NftStorageBackend::new(config, api_key)?),
        StorageProvider::Pinata => {
            let secret_key = config
                .secret_key()
                .ok_or(AppError::NotConfigured("PINATA_SECRET_KEY"))?;
            Arc::new(PinataBackend::new(config, api_key, secret_key)?)
        }
    };

    info!(provider = store.name(), endpoint = %config.endpoint(), "Registered IPFS backend");
    Ok(Some(store))
}
