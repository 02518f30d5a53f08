//! Gemini `generateContent` REST client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::backend::traits::{GenerateRequest, GenerativeModel};
use crate::config::GeminiConfig;
use crate::error::{AppError, Result};
use crate::media::data_uri;

/// Gemini model backend
pub struct GeminiBackend {
    client: Client,
    api_key: String,
    base_url: String,
    vision_model: String,
    text_model: String,
}

#[derive(Debug, Serialize)]
struct ApiGenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GeminiBackend {
    /// Create a new Gemini backend from configuration and a non-empty API key
    pub fn new(config: &GeminiConfig, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            vision_model: config.vision_model.clone(),
            text_model: config.text_model.clone(),
        })
    }

    fn model_for(&self, request: &GenerateRequest) -> &str {
        if request.image.is_some() {
            &self.vision_model
        } else {
            &self.text_model
        }
    }

    fn build_body(request: GenerateRequest) -> ApiGenerateRequest {
        let mut parts = vec![Part::Text {
            text: request.prompt,
        }];
        if let Some(image) = request.image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type,
                    data: data_uri::encode(&image.data),
                },
            });
        }

        ApiGenerateRequest {
            contents: vec![Content { parts }],
            generation_config: request.json_output.then(|| GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        }
    }
}

/// Concatenated text of the first candidate, as the official SDKs report it
fn response_text(response: ApiGenerateResponse) -> Result<String> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(AppError::Model(format!("Prompt blocked: {}", reason)));
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(AppError::Model("No response from model".to_string()));
    }

    Ok(text)
}

#[async_trait]
impl GenerativeModel for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let model = self.model_for(&request).to_string();
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        debug!(
            model = %model,
            with_image = request.image.is_some(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_body(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(model = %model, status = %status, "Gemini API returned an error");
            return Err(AppError::Model(format!("Backend returned {}: {}", status, body)));
        }

        let api_response: ApiGenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Model(format!("Failed to parse response: {}", e)))?;

        response_text(api_response)
    }
}
