//! Image analysis gateway
//!
//! Validates the data URI, asks the vision model for a diagnosis, normalizes
//! its answer and pins the image when storage is configured.

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::backend::traits::{GenerateRequest, GenerativeModel, InlineImage};
use crate::diagnosis::{mock::mock_analysis, normalizer, AnalysisResult};
use crate::error::Result;
use crate::gateway::{prompts, uploader::StorageUploader};
use crate::media::DataUri;

/// Policy knobs for the analysis path
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    /// Return the fixed fallback result instead of an error when the model fails
    pub fallback_on_error: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            fallback_on_error: true,
        }
    }
}

/// A diagnosis plus the CID of the pinned image, if any
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub image_cid: Option<String>,
}

pub struct AnalysisGateway {
    model: Option<Arc<dyn GenerativeModel>>,
    uploader: StorageUploader,
    options: AnalysisOptions,
}

impl AnalysisGateway {
    pub fn new(
        model: Option<Arc<dyn GenerativeModel>>,
        uploader: StorageUploader,
        options: AnalysisOptions,
    ) -> Self {
        Self {
            model,
            uploader,
            options,
        }
    }

    /// Analyze an image given as a `data:image/...;base64,...` URI
    pub async fn analyze(&self, image: &str, subject_hint: Option<&str>) -> Result<AnalysisOutcome> {
        let image = DataUri::parse(image)?;
        let result = self.diagnose(&image, subject_hint).await?;
        let image_cid = self.pin(image).await;

        Ok(AnalysisOutcome { result, image_cid })
    }

    async fn diagnose(&self, image: &DataUri, subject_hint: Option<&str>) -> Result<AnalysisResult> {
        let Some(model) = &self.model else {
            warn!("Model API key not set, returning mock analysis");
            return Ok(random_mock(subject_hint));
        };

        debug!(
            model = model.name(),
            mime_type = image.mime_type(),
            size = image.data().len(),
            "Requesting image analysis"
        );

        let request = GenerateRequest::vision(
            prompts::diagnosis_prompt(subject_hint),
            InlineImage {
                mime_type: image.mime_type().to_string(),
                data: image.data().to_vec(),
            },
        );

        match model.generate(request).await {
            Ok(output) => Ok(normalizer::normalize(&output, subject_hint)),
            Err(e) if self.options.fallback_on_error => {
                error!(model = model.name(), error = %e, "Analysis API error, falling back to basic analysis");
                Ok(AnalysisResult::fallback(subject_hint))
            }
            Err(e) => Err(e),
        }
    }

    /// Best-effort upload; failures only cost the CID
    async fn pin(&self, image: DataUri) -> Option<String> {
        if !self.uploader.is_enabled() {
            return None;
        }

        match self.uploader.upload_image(image.into_data()).await {
            Ok(cid) => Some(cid),
            Err(e) => {
                warn!(error = %e, "IPFS upload failed, continuing without CID");
                None
            }
        }
    }
}

/// The thread-local RNG must not be held across an await
fn random_mock(subject_hint: Option<&str>) -> AnalysisResult {
    mock_analysis(&mut rand::thread_rng(), subject_hint)
}
