//! AgriScan Gateway
//!
//! HTTP backend for the AgriScan mobile app. Forwards plant and animal images
//! and farmer questions to a hosted vision-language model, normalizes the
//! model's answers into a fixed diagnosis schema, and optionally pins images
//! to IPFS.

pub mod api;
pub mod backend;
pub mod config;
pub mod diagnosis;
pub mod error;
pub mod gateway;
pub mod media;

pub use error::{AppError, Result};

use std::sync::Arc;

use backend::{BlobStore, GenerativeModel};
use gateway::{AnalysisGateway, AnalysisOptions, ChatGateway, StorageUploader};

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Arc<config::Settings>,
    pub analysis: AnalysisGateway,
    pub chat: ChatGateway,
}

impl AppState {
    /// Wire the gateways from explicitly constructed clients. `None` selects
    /// mock mode for the model and disables uploads for the store.
    pub fn new(
        settings: config::Settings,
        model: Option<Arc<dyn GenerativeModel>>,
        store: Option<Arc<dyn BlobStore>>,
    ) -> Self {
        let options = AnalysisOptions {
            fallback_on_error: settings.analysis.fallback_on_error,
        };

        Self {
            analysis: AnalysisGateway::new(model.clone(), StorageUploader::new(store), options),
            chat: ChatGateway::new(model),
            settings: Arc::new(settings),
        }
    }

    /// Build the model and storage clients described by `settings`
    pub fn from_settings(settings: config::Settings) -> Result<Self> {
        let model = backend::model_from_config(&settings.gemini)?;
        let store = backend::blob_store_from_config(&settings.storage)?;
        Ok(Self::new(settings, model, store))
    }
}
