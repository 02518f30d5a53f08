//! Image pinning on top of an optional blob store

use std::sync::Arc;
use tracing::{error, info};

use crate::backend::traits::{Blob, BlobStore};
use crate::error::{AppError, Result};

/// File name every uploaded image is stored under
pub const UPLOAD_FILE_NAME: &str = "plant-image.jpg";

/// MIME type every uploaded image is stored with
pub const UPLOAD_MIME_TYPE: &str = "image/jpeg";

/// Uploads image bytes to IPFS when a storage backend is configured
#[derive(Clone, Default)]
pub struct StorageUploader {
    store: Option<Arc<dyn BlobStore>>,
}

impl StorageUploader {
    pub fn new(store: Option<Arc<dyn BlobStore>>) -> Self {
        Self { store }
    }

    /// Whether uploads will be attempted at all
    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Upload an image and return its CID.
    ///
    /// Fails immediately when no backend is configured; backend failures are
    /// wrapped in [`AppError::Storage`].
    pub async fn upload_image(&self, data: Vec<u8>) -> Result<String> {
        let store = self
            .store
            .as_ref()
            .ok_or(AppError::NotConfigured("IPFS_API_KEY"))?;

        let size = data.len();
        let blob = Blob {
            file_name: UPLOAD_FILE_NAME.to_string(),
            mime_type: UPLOAD_MIME_TYPE.to_string(),
            data,
        };

        match store.store_blob(blob).await {
            Ok(cid) => {
                info!(provider = store.name(), cid = %cid, size, "Image uploaded to IPFS");
                Ok(cid)
            }
            Err(e) => {
                error!(provider = store.name(), error = %e, "IPFS upload error");
                Err(AppError::Storage(e.to_string()))
            }
        }
    }
}
