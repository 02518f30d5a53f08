//! Common traits and types for model and storage backends

use async_trait::async_trait;

use crate::error::Result;

/// Image sent to a model inline with the prompt
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Request to generate content
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// The prompt text
    pub prompt: String,

    /// Optional image; selects the vision model
    pub image: Option<InlineImage>,

    /// Ask the model to answer with JSON only
    pub json_output: bool,
}

impl GenerateRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
            json_output: false,
        }
    }

    pub fn vision(prompt: impl Into<String>, image: InlineImage) -> Self {
        Self {
            prompt: prompt.into(),
            image: Some(image),
            json_output: true,
        }
    }
}

/// Trait for hosted generative models
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Generate a text answer for a request
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}

/// File-like payload handed to a blob store
#[derive(Debug, Clone)]
pub struct Blob {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Trait for content-addressed blob stores
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Store a blob and return its content identifier
    async fn store_blob(&self, blob: Blob) -> Result<String>;
}
