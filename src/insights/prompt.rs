//! Prompt construction for the insight service, plus bullet-line parsing of
//! free-text responses.

use crate::analytics::patterns::DiseasePattern;
use crate::models::{Admission, MedicalHistoryEntry, Patient};

/// History entries included when summarizing a record in a prompt.
const HISTORY_PROMPT_LIMIT: usize = 5;
/// Prior conditions included when asking about a specific diagnosis.
const CONDITION_PROMPT_LIMIT: usize = 3;

pub(crate) fn patient_insights(patient: &Patient, history: &[MedicalHistoryEntry]) -> String {
    format!(
        "Analyze this patient record and provide insights.\n\n\
         Patient information:\n\
         - Name: {}\n\
         - Age: {}\n\
         - Gender: {}\n\n\
         Medical history:\n{}\n\n\
         Provide a brief analysis covering:\n\
         1. Health risk factors\n\
         2. Preventive care recommendations\n\
         3. Lifestyle suggestions\n\n\
         Keep the response concise (3-4 sentences).",
        patient.name,
        age_text(patient.age),
        patient.gender.as_str(),
        format_history(history),
    )
}

pub(crate) fn treatment_plan(
    diagnosis: &str,
    age: Option<u32>,
    history: &[MedicalHistoryEntry],
) -> String {
    format!(
        "Suggest a treatment plan for:\n\n\
         Diagnosis: {diagnosis}\n\
         Patient age: {}\n\
         Previous conditions: {}\n\n\
         Provide:\n\
         1. Primary treatment approach\n\
         2. Medications (generic names)\n\
         3. Lifestyle modifications\n\
         4. Follow-up schedule\n\n\
         Format as a numbered list. Keep concise.",
        age_text(age),
        condition_list(history),
    )
}

pub(crate) fn symptom_analysis(symptoms: &str) -> String {
    format!(
        "Analyze these symptoms and suggest possible conditions:\n\n\
         Symptoms: {symptoms}\n\n\
         Provide:\n\
         1. Most likely conditions (3-4)\n\
         2. Urgency level (Low/Medium/High)\n\
         3. Recommended next steps\n\n\
         Note: informational purposes only; the patient must consult a doctor.\n\
         Keep the response brief and clear."
    )
}

pub(crate) fn complications(
    diagnosis: &str,
    age: Option<u32>,
    history: &[MedicalHistoryEntry],
) -> String {
    format!(
        "Predict potential complications for:\n\n\
         Current diagnosis: {diagnosis}\n\
         Patient age: {}\n\
         Medical history: {}\n\n\
         List 3-5 potential complications to watch for.\n\
         Format as bullet points. Be specific but concise.",
        age_text(age),
        condition_list(history),
    )
}

pub(crate) fn discharge_summary(patient: &Patient, admission: &Admission) -> String {
    format!(
        "Generate a discharge summary for:\n\n\
         Patient: {}, {} years\n\
         Diagnosis: {}\n\
         Treatment given: {}\n\
         Admission date: {}\n\n\
         Include:\n\
         1. Brief hospitalization summary\n\
         2. Discharge instructions\n\
         3. Medications to continue\n\
         4. Follow-up schedule\n\n\
         Professional medical format. Concise.",
        patient.name,
        age_text(patient.age),
        admission.diagnosis.as_deref().unwrap_or("not recorded"),
        admission.treatment.as_deref().unwrap_or("not recorded"),
        admission.admitted_at.format("%Y-%m-%d"),
    )
}

pub(crate) fn trend_analysis(patterns: &[DiseasePattern]) -> String {
    let diseases = patterns
        .iter()
        .take(5)
        .map(|p| format!("{} ({})", p.disease, p.frequency))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Analyze these hospital disease trends:\n\n\
         {diseases}\n\n\
         Provide:\n\
         1. Pattern insights\n\
         2. Seasonal considerations\n\
         3. Resource planning suggestions\n\n\
         Keep the response brief (3-4 sentences)."
    )
}

pub(crate) fn health_tips(age: Option<u32>, gender: &str, conditions: &[String]) -> String {
    format!(
        "Provide 5 personalized health tips for:\n\n\
         Age: {}\n\
         Gender: {gender}\n\
         Conditions: {}\n\n\
         Format as bullet points. Practical and specific advice.",
        age_text(age),
        conditions
            .iter()
            .take(CONDITION_PROMPT_LIMIT)
            .cloned()
            .collect::<Vec<_>>()
            .join(", "),
    )
}

fn age_text(age: Option<u32>) -> String {
    age.map_or_else(|| "unknown".into(), |a| a.to_string())
}

fn format_history(history: &[MedicalHistoryEntry]) -> String {
    if history.is_empty() {
        return "No previous medical history".into();
    }
    history
        .iter()
        .take(HISTORY_PROMPT_LIMIT)
        .map(|h| {
            format!(
                "- {}: {}",
                h.disease.as_deref().unwrap_or("unspecified"),
                h.treatment.as_deref().unwrap_or("unspecified"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn condition_list(history: &[MedicalHistoryEntry]) -> String {
    history
        .iter()
        .take(CONDITION_PROMPT_LIMIT)
        .filter_map(|h| h.disease.clone())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Extract up to `max` non-empty lines from a bulleted response, with
/// leading bullet markers stripped.
pub(crate) fn parse_bullet_lines(text: &str, max: usize) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim_matches(|c: char| c == '-' || c == '•' || c == '*' || c.is_whitespace())
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .take(max)
        .collect()
}
