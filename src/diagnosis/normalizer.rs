//! Normalization of raw model output into an [`AnalysisResult`]
//!
//! Models are asked for a JSON object but frequently wrap it in markdown
//! fences or prose, or answer in prose alone. The first balanced JSON object
//! in the text is used when it parses; otherwise the whole text is scanned
//! for severity keywords.

use serde_json::{Map, Value};
use tracing::warn;

use super::{subject_or_unknown, AnalysisResult, Diagnosis, ANALYSIS_APOLOGY};

const SEVERE_KEYWORDS: &[&str] = &["severe", "critical"];
const MILD_KEYWORDS: &[&str] = &["mild", "early", "minor"];

/// Confidence used when the structured output carries no usable value
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Normalize raw model output into a well-formed result. Never fails.
pub fn normalize(raw: &str, subject_hint: Option<&str>) -> AnalysisResult {
    match extract_json_object(raw).and_then(parse_object) {
        Some(fields) => from_fields(&fields, subject_hint),
        None => {
            warn!(output_len = raw.len(), "Model output had no parsable JSON object, scanning text");
            from_text(raw, subject_hint)
        }
    }
}

/// Classify free text into one of the three diagnoses.
///
/// Case-insensitive; severe keywords take priority over mild ones.
pub fn classify(text: &str) -> Diagnosis {
    let lower = text.to_lowercase();
    if SEVERE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Diagnosis::SevereDisease
    } else if MILD_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Diagnosis::MildDisease
    } else {
        Diagnosis::Healthy
    }
}

/// Clamp a confidence into `[0.0, 1.0]`; non-finite values get the default
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        DEFAULT_CONFIDENCE
    }
}

/// Replace reasoning that leaks internal configuration language
pub fn sanitize_reasoning(reasoning: String) -> String {
    let lower = reasoning.to_lowercase();
    let leaks = lower.contains("mock")
        || lower.contains("gemini_api_key")
        || (lower.contains("set") && lower.contains("for real"));

    if leaks {
        ANALYSIS_APOLOGY.to_string()
    } else {
        reasoning
    }
}

/// Find the first balanced `{...}` in `text`. Braces inside JSON string
/// literals do not count.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(fields)) => Some(fields),
        Ok(_) => None,
        Err(e) => {
            warn!(error = %e, "Failed to parse model JSON");
            None
        }
    }
}

fn from_fields(fields: &Map<String, Value>, subject_hint: Option<&str>) -> AnalysisResult {
    let diagnosis = classify(&text_field(fields, "diagnosis").unwrap_or_default());
    let confidence = number_field(fields, "confidence")
        .map(clamp_confidence)
        .unwrap_or(DEFAULT_CONFIDENCE);
    let reasoning = sanitize_reasoning(text_field(fields, "reasoning").unwrap_or_default());

    AnalysisResult {
        diagnosis,
        confidence,
        reasoning,
        identified_subject: text_field(fields, "identifiedSubject")
            .unwrap_or_else(|| subject_or_unknown(subject_hint)),
        disease_name: text_field(fields, "diseaseName")
            .unwrap_or_else(|| diagnosis.default_disease_name().to_string()),
        disease_description: text_field(fields, "diseaseDescription").unwrap_or_default(),
        prevention_tips: text_field(fields, "preventionTips").unwrap_or_default(),
        severity: text_field(fields, "severity").unwrap_or_default(),
    }
}

fn from_text(text: &str, subject_hint: Option<&str>) -> AnalysisResult {
    let diagnosis = classify(text);
    let confidence = match diagnosis {
        Diagnosis::SevereDisease => 0.8,
        Diagnosis::MildDisease => 0.7,
        Diagnosis::Healthy => 0.5,
    };

    AnalysisResult {
        diagnosis,
        confidence,
        reasoning: ANALYSIS_APOLOGY.to_string(),
        identified_subject: subject_or_unknown(subject_hint),
        disease_name: diagnosis.default_disease_name().to_string(),
        disease_description: String::new(),
        prevention_tips: String::new(),
        severity: String::new(),
    }
}

/// A free-text field. Blank strings count as missing, string lists are
/// joined line by line and scalars are rendered as text.
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match fields.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Object(_) => return None,
    };

    (!text.is_empty()).then_some(text)
}

fn number_field(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    match fields.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
