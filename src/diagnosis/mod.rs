//! Diagnosis domain - result types, output normalization and mock results

pub mod mock;
pub mod normalizer;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reasoning shown to users whenever no trustworthy model explanation is available
pub const ANALYSIS_APOLOGY: &str =
    "Unable to generate advanced analysis - something went wrong. Please try again later.";

/// Subject reported when neither the model nor the caller named one
pub const UNKNOWN_SUBJECT: &str = "Unknown";

/// Coarse health category of an analyzed subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diagnosis {
    #[serde(rename = "Healthy")]
    Healthy,
    #[serde(rename = "Mild Disease")]
    MildDisease,
    #[serde(rename = "Severe Disease")]
    SevereDisease,
}

impl Diagnosis {
    pub const ALL: [Diagnosis; 3] = [
        Diagnosis::Healthy,
        Diagnosis::MildDisease,
        Diagnosis::SevereDisease,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::Healthy => "Healthy",
            Diagnosis::MildDisease => "Mild Disease",
            Diagnosis::SevereDisease => "Severe Disease",
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Diagnosis::Healthy)
    }

    /// Disease name used when the model did not supply one
    pub fn default_disease_name(&self) -> &'static str {
        if self.is_healthy() {
            "None"
        } else {
            "Unknown Disease"
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical analysis record returned to the mobile client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub diagnosis: Diagnosis,
    /// Always within `[0.0, 1.0]`
    pub confidence: f64,
    pub reasoning: String,
    pub identified_subject: String,
    pub disease_name: String,
    pub disease_description: String,
    pub prevention_tips: String,
    pub severity: String,
}

impl AnalysisResult {
    /// Fixed result used when the model is unreachable or fails
    pub fn fallback(subject_hint: Option<&str>) -> Self {
        Self {
            diagnosis: Diagnosis::Healthy,
            confidence: 0.5,
            reasoning: ANALYSIS_APOLOGY.to_string(),
            identified_subject: subject_or_unknown(subject_hint),
            disease_name: Diagnosis::Healthy.default_disease_name().to_string(),
            disease_description: String::new(),
            prevention_tips: String::new(),
            severity: String::new(),
        }
    }
}

/// The caller's subject hint, or "Unknown" when it is missing or blank
pub fn subject_or_unknown(subject_hint: Option<&str>) -> String {
    subject_hint
        .map(str::trim)
        .filter(|hint| !hint.is_empty())
        .unwrap_or(UNKNOWN_SUBJECT)
        .to_string()
}
