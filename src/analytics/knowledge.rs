//! Fixed clinical lookup tables: condition-keyword treatment suggestions and
//! theatre duration estimates.
//!
//! Both tables are ordered slices, and declaration order is behavior: when a
//! diagnosis matches several condition keywords the payloads accumulate in
//! table order, and the first matching procedure keyword wins outright.

use serde::Serialize;

const TREATMENT_KNOWLEDGE_BASE: &[(&str, &[&str])] = &[
    (
        "fever",
        &[
            "Antipyretic medications (Paracetamol)",
            "Adequate hydration",
            "Rest and monitoring",
            "Check for underlying infection",
        ],
    ),
    (
        "diabetes",
        &[
            "Blood sugar monitoring",
            "Insulin therapy if required",
            "Dietary modifications",
            "Regular exercise regimen",
            "Foot care and regular check-ups",
        ],
    ),
    (
        "hypertension",
        &[
            "Antihypertensive medications",
            "Low sodium diet",
            "Regular blood pressure monitoring",
            "Stress management",
            "Regular cardiovascular check-ups",
        ],
    ),
    (
        "infection",
        &[
            "Appropriate antibiotic therapy",
            "Complete blood count monitoring",
            "Adequate rest and nutrition",
            "Follow-up cultures if needed",
        ],
    ),
    (
        "fracture",
        &[
            "Immobilization and casting",
            "Pain management",
            "X-ray follow-up",
            "Physical therapy post-healing",
            "Calcium and Vitamin D supplementation",
        ],
    ),
    (
        "asthma",
        &[
            "Bronchodilators",
            "Inhaled corticosteroids",
            "Avoid triggers and allergens",
            "Peak flow monitoring",
            "Action plan for exacerbations",
        ],
    ),
    (
        "cardiac",
        &[
            "ECG monitoring",
            "Cardiac enzyme tests",
            "Medication as per condition",
            "Lifestyle modifications",
            "Regular cardiologist follow-up",
        ],
    ),
];

/// Served for an empty diagnosis — nothing to match against yet.
const EVALUATION_NEEDED_ADVICE: [&str; 3] = [
    "Comprehensive diagnostic evaluation needed",
    "Detailed patient history required",
    "Appropriate investigations recommended",
];

/// Served when a diagnosis matches no known condition keyword.
const GENERIC_ADVICE: [&str; 5] = [
    "Detailed clinical evaluation recommended",
    "Appropriate diagnostic tests",
    "Specialist consultation if needed",
    "Symptomatic treatment",
    "Regular monitoring and follow-up",
];

/// Suggested treatments for a free-text diagnosis, by case-insensitive
/// substring match. Multiple matching keywords accumulate; they are not
/// mutually exclusive.
pub fn treatments_for(diagnosis: &str) -> Vec<String> {
    if diagnosis.is_empty() {
        return EVALUATION_NEEDED_ADVICE.iter().map(|s| s.to_string()).collect();
    }

    let lower = diagnosis.to_lowercase();
    let mut recommendations: Vec<String> = Vec::new();
    for (keyword, treatments) in TREATMENT_KNOWLEDGE_BASE {
        if lower.contains(keyword) {
            recommendations.extend(treatments.iter().map(|s| s.to_string()));
        }
    }

    if recommendations.is_empty() {
        recommendations = GENERIC_ADVICE.iter().map(|s| s.to_string()).collect();
    }
    recommendations
}

// ---------------------------------------------------------------------------
// Theatre duration estimates
// ---------------------------------------------------------------------------

/// Estimated theatre time in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationEstimate {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

const OT_DURATION_TABLE: &[(&str, DurationEstimate)] = &[
    ("appendectomy", DurationEstimate { min: 1.0, max: 2.0, avg: 1.5 }),
    ("cesarean", DurationEstimate { min: 1.0, max: 1.5, avg: 1.25 }),
    ("hernia", DurationEstimate { min: 1.0, max: 2.0, avg: 1.5 }),
    ("orthopedic", DurationEstimate { min: 2.0, max: 4.0, avg: 3.0 }),
    ("cardiac", DurationEstimate { min: 3.0, max: 6.0, avg: 4.5 }),
    ("neuro", DurationEstimate { min: 3.0, max: 8.0, avg: 5.0 }),
    ("laparoscopy", DurationEstimate { min: 1.0, max: 3.0, avg: 2.0 }),
];

const DEFAULT_DURATION: DurationEstimate = DurationEstimate {
    min: 1.0,
    max: 3.0,
    avg: 2.0,
};

/// Estimated duration for a procedure by first-match keyword lookup.
/// Unknown procedures get the default estimate.
pub fn duration_for(procedure_name: &str) -> DurationEstimate {
    let lower = procedure_name.to_lowercase();
    for (keyword, estimate) in OT_DURATION_TABLE {
        if lower.contains(keyword) {
            return *estimate;
        }
    }
    DEFAULT_DURATION
}
