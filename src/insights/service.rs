//! The insight service: a fixed set of free-text operations, each with a
//! deterministic fallback for when the generator is absent or erroring.
//!
//! Degraded results are tagged `GeneratorUnavailable` (nothing configured)
//! or `GeneratorFailed` (configured but erroring); the two paths serve
//! distinct fixed texts where the operations call for it.

use crate::analytics::patterns::DiseasePattern;
use crate::analytics::{Derived, FallbackReason};
use crate::config;
use crate::models::{Admission, MedicalHistoryEntry, Patient};

use super::{prompt, GenerationClient, InsightError, TextGenerator};

const SYSTEM_PROMPT: &str = "You are a clinical decision-support assistant for hospital staff. \
     Your output is informational only and always defers to the treating physician.";

/// Complications and tips are capped to keep the rendered lists short.
const BULLET_LINE_LIMIT: usize = 5;

const SYMPTOM_UNAVAILABLE: &str =
    "Please consult a healthcare professional for accurate diagnosis.";
const SYMPTOM_FAILED: &str = "Error analyzing symptoms. Please consult a healthcare professional.";

const COMPLICATIONS_UNAVAILABLE: [&str; 3] = [
    "Monitor vital signs regularly",
    "Follow prescribed treatment",
    "Regular check-ups recommended",
];
const COMPLICATIONS_FAILED: [&str; 3] = [
    "Monitor for any unusual symptoms",
    "Maintain prescribed medication schedule",
    "Regular vital sign checks",
];

const TREND_UNAVAILABLE: &str =
    "Disease trend analysis requires a configured text-generation service.";
const TREND_FAILED: &str = "Unable to analyze trends at this time.";

const TIPS_UNAVAILABLE: [&str; 4] = [
    "Maintain a balanced diet",
    "Exercise regularly",
    "Get adequate sleep",
    "Stay hydrated",
];
const TIPS_FAILED: [&str; 4] = [
    "Maintain healthy lifestyle",
    "Regular medical check-ups",
    "Balanced diet",
    "Adequate rest",
];

pub struct InsightService<G = GenerationClient> {
    generator: Option<G>,
    model: String,
}

impl InsightService<GenerationClient> {
    /// Build from configuration. With no endpoint configured, every
    /// operation serves its fixed fallback.
    pub fn from_config() -> Self {
        let generator = GenerationClient::from_config();
        if generator.is_none() {
            tracing::info!("Text generation not configured; insights serve fixed fallbacks");
        }
        Self {
            generator,
            model: config::generation_model(),
        }
    }
}

impl<G: TextGenerator> InsightService<G> {
    pub fn new(generator: Option<G>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        match &self.generator {
            Some(generator) => generator.generate(&self.model, prompt, SYSTEM_PROMPT),
            None => Err(InsightError::Disabled),
        }
    }

    /// Narrative health insights for one patient record.
    pub fn patient_insights(
        &self,
        patient: &Patient,
        history: &[MedicalHistoryEntry],
    ) -> Derived<String> {
        match self.generate(&prompt::patient_insights(patient, history)) {
            Ok(text) => Derived::computed(text),
            Err(InsightError::Disabled) => Derived::degraded(
                basic_insights(patient, history),
                FallbackReason::GeneratorUnavailable,
            ),
            Err(e) => {
                tracing::warn!("Patient insight generation failed: {e}");
                Derived::degraded(
                    basic_insights(patient, history),
                    FallbackReason::GeneratorFailed,
                )
            }
        }
    }

    /// Narrative treatment plan for a diagnosis.
    pub fn treatment_plan(
        &self,
        diagnosis: &str,
        age: Option<u32>,
        history: &[MedicalHistoryEntry],
    ) -> Derived<String> {
        match self.generate(&prompt::treatment_plan(diagnosis, age, history)) {
            Ok(text) => Derived::computed(text),
            Err(InsightError::Disabled) => Derived::degraded(
                basic_treatment(diagnosis),
                FallbackReason::GeneratorUnavailable,
            ),
            Err(e) => {
                tracing::warn!("Treatment plan generation failed: {e}");
                Derived::degraded(basic_treatment(diagnosis), FallbackReason::GeneratorFailed)
            }
        }
    }

    /// Free-text symptom triage.
    pub fn analyze_symptoms(&self, symptoms: &str) -> Derived<String> {
        match self.generate(&prompt::symptom_analysis(symptoms)) {
            Ok(text) => Derived::computed(text),
            Err(InsightError::Disabled) => Derived::degraded(
                SYMPTOM_UNAVAILABLE.into(),
                FallbackReason::GeneratorUnavailable,
            ),
            Err(e) => {
                tracing::warn!("Symptom analysis failed: {e}");
                Derived::degraded(SYMPTOM_FAILED.into(), FallbackReason::GeneratorFailed)
            }
        }
    }

    /// Up to five complication watch items for a diagnosis.
    pub fn predict_complications(
        &self,
        diagnosis: &str,
        age: Option<u32>,
        history: &[MedicalHistoryEntry],
    ) -> Derived<Vec<String>> {
        match self.generate(&prompt::complications(diagnosis, age, history)) {
            Ok(text) => Derived::computed(prompt::parse_bullet_lines(&text, BULLET_LINE_LIMIT)),
            Err(InsightError::Disabled) => Derived::degraded(
                COMPLICATIONS_UNAVAILABLE.iter().map(|s| s.to_string()).collect(),
                FallbackReason::GeneratorUnavailable,
            ),
            Err(e) => {
                tracing::warn!("Complication prediction failed: {e}");
                Derived::degraded(
                    COMPLICATIONS_FAILED.iter().map(|s| s.to_string()).collect(),
                    FallbackReason::GeneratorFailed,
                )
            }
        }
    }

    /// Discharge summary narrative for a completed admission.
    pub fn discharge_summary(&self, patient: &Patient, admission: &Admission) -> Derived<String> {
        match self.generate(&prompt::discharge_summary(patient, admission)) {
            Ok(text) => Derived::computed(text),
            Err(InsightError::Disabled) => Derived::degraded(
                basic_discharge_summary(admission),
                FallbackReason::GeneratorUnavailable,
            ),
            Err(e) => {
                tracing::warn!("Discharge summary generation failed: {e}");
                Derived::degraded(
                    basic_discharge_summary(admission),
                    FallbackReason::GeneratorFailed,
                )
            }
        }
    }

    /// Narrative over the ranked disease patterns.
    pub fn analyze_trends(&self, patterns: &[DiseasePattern]) -> Derived<String> {
        match self.generate(&prompt::trend_analysis(patterns)) {
            Ok(text) => Derived::computed(text),
            Err(InsightError::Disabled) => Derived::degraded(
                TREND_UNAVAILABLE.into(),
                FallbackReason::GeneratorUnavailable,
            ),
            Err(e) => {
                tracing::warn!("Trend analysis failed: {e}");
                Derived::degraded(TREND_FAILED.into(), FallbackReason::GeneratorFailed)
            }
        }
    }

    /// Up to five personalized health tips.
    pub fn health_tips(
        &self,
        age: Option<u32>,
        gender: &str,
        conditions: &[String],
    ) -> Derived<Vec<String>> {
        match self.generate(&prompt::health_tips(age, gender, conditions)) {
            Ok(text) => Derived::computed(prompt::parse_bullet_lines(&text, BULLET_LINE_LIMIT)),
            Err(InsightError::Disabled) => Derived::degraded(
                TIPS_UNAVAILABLE.iter().map(|s| s.to_string()).collect(),
                FallbackReason::GeneratorUnavailable,
            ),
            Err(e) => {
                tracing::warn!("Health tip generation failed: {e}");
                Derived::degraded(
                    TIPS_FAILED.iter().map(|s| s.to_string()).collect(),
                    FallbackReason::GeneratorFailed,
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Fixed fallback texts
// ---------------------------------------------------------------------------

fn basic_insights(patient: &Patient, history: &[MedicalHistoryEntry]) -> String {
    let age = patient.age.unwrap_or(0);
    if age > 60 && history.len() > 3 {
        "Patient requires regular monitoring due to age and medical history. \
         Focus on preventive care and lifestyle management."
            .into()
    } else if history.len() > 5 {
        "Multiple medical conditions require coordinated care approach. \
         Regular follow-ups recommended."
            .into()
    } else {
        "Maintain healthy lifestyle and regular check-ups. Follow prescribed treatment plans."
            .into()
    }
}

fn basic_treatment(diagnosis: &str) -> String {
    format!(
        "Recommended treatment for {diagnosis}:\n\
         1. Appropriate medication as prescribed\n\
         2. Rest and proper nutrition\n\
         3. Follow-up in 7-10 days\n\
         4. Monitor for any complications"
    )
}

fn basic_discharge_summary(admission: &Admission) -> String {
    format!(
        "Discharge Summary:\n\n\
         Patient was treated for {}.\n\
         Treatment provided: {}\n\n\
         Discharge Instructions:\n\
         1. Continue prescribed medications\n\
         2. Follow-up appointment in 1 week\n\
         3. Rest and proper nutrition\n\
         4. Contact hospital if symptoms worsen",
        admission.diagnosis.as_deref().unwrap_or("the admitting condition"),
        admission.treatment.as_deref().unwrap_or("as recorded"),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
