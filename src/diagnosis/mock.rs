//! Randomized results for running without a model credential (demos, offline development)

use rand::{seq::SliceRandom, Rng};

use super::{subject_or_unknown, AnalysisResult, Diagnosis, ANALYSIS_APOLOGY};

/// Build a mock result: uniform diagnosis, confidence uniform in `[0.6, 0.9]`
/// rounded to two decimals.
pub fn mock_analysis<R: Rng + ?Sized>(rng: &mut R, subject_hint: Option<&str>) -> AnalysisResult {
    let diagnosis = *Diagnosis::ALL
        .choose(rng)
        .unwrap_or(&Diagnosis::Healthy);
    let confidence = (rng.gen_range(0.6..=0.9_f64) * 100.0).round() / 100.0;

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
