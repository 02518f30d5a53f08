//! Request and response bodies of the HTTP API

use serde::{Deserialize, Serialize};

use crate::diagnosis::Diagnosis;
use crate::gateway::AnalysisOutcome;

/// `POST /analyze` body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub plant_type: Option<String>,
}

/// `POST /analyze` response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub diagnosis: Diagnosis,
    pub confidence: f64,
    /// Serialized as `null` when the image was not pinned
    pub image_cid: Option<String>,
    pub identified_subject: String,
    pub reasoning: String,
    pub disease_name: String,
    pub disease_description: String,
    pub prevention_tips: String,
    pub severity: String,
}

impl From<AnalysisOutcome> for AnalyzeResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        let result = outcome.result;
        Self {
            diagnosis: result.diagnosis,
            confidence: result.confidence,
            image_cid: outcome.image_cid,
            identified_subject: result.identified_subject,
            reasoning: result.reasoning,
            disease_name: result.disease_name,
            disease_description: result.disease_description,
            prevention_tips: result.prevention_tips,
            severity: result.severity,
        }
    }
}

/// `POST /chat` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

/// `POST /chat` response
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// `GET /health` response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}
