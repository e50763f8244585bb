//! Patient risk scoring and the per-patient health-score insight.
//!
//! The score is a weighted sum of three signals — age band, medical-history
//! depth, admission count — clamped to [0, 100] and banded into a level.
//! Weights are fixed; there is no trained model behind this.

use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Serialize;

use crate::db;
use crate::models::{Patient, RiskInputs};

use super::{Derived, FallbackReason};

/// Age assumed when the patient record carries none.
const DEFAULT_AGE: u32 = 30;
/// Cap on the medical-history contribution.
const HISTORY_CAP: u32 = 35;
/// Cap on the admission contribution.
const ADMISSION_CAP: u32 = 35;

const HIGH_RISK_ACTIONS: [&str; 3] = [
    "Immediate medical attention recommended",
    "Consider ICU monitoring",
    "Frequent vital signs monitoring required",
];

const MEDIUM_RISK_ACTIONS: [&str; 3] = [
    "Regular medical check-ups advised",
    "Monitor for any symptom changes",
    "Maintain prescribed medication schedule",
];

const LOW_RISK_ACTIONS: [&str; 3] = [
    "Maintain healthy lifestyle",
    "Annual check-up recommended",
    "Continue preventive care",
];

const ELDERLY_SCREENING_ACTION: &str = "Age-specific health screening advised";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Banding of a 0-100 risk score. `Unknown` marks degraded results only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unknown => "Unknown",
        }
    }

    /// Presentation badge token. Never a scoring input.
    pub fn color_token(&self) -> &'static str {
        match self {
            Self::High => "danger",
            Self::Medium => "warning",
            Self::Low => "success",
            Self::Unknown => "secondary",
        }
    }
}

/// The inputs as scored, after defaulting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskFactors {
    pub age: u32,
    pub history_count: u32,
    pub admission_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub color: &'static str,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<RiskFactors>,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score one patient's derived clinical risk.
///
/// Age contributes 30 points above 70, 20 above 60, 10 above 50 and 15
/// under 5; history contributes 5 per entry capped at 35; admissions 7 each,
/// also capped at 35.
pub fn score_risk(inputs: &RiskInputs) -> RiskAssessment {
    let age = inputs.age.unwrap_or(DEFAULT_AGE);

    let age_points = if age > 70 {
        30
    } else if age > 60 {
        20
    } else if age > 50 {
        10
    } else if age < 5 {
        15
    } else {
        0
    };

    let history_points = inputs.history_count.saturating_mul(5).min(HISTORY_CAP);
    let admission_points = inputs.admission_count.saturating_mul(7).min(ADMISSION_CAP);
    let score = (age_points + history_points + admission_points).min(100);

    let level = if score >= 70 {
        RiskLevel::High
    } else if score >= 40 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let base: &[&str] = match level {
        RiskLevel::High => &HIGH_RISK_ACTIONS,
        RiskLevel::Medium => &MEDIUM_RISK_ACTIONS,
        _ => &LOW_RISK_ACTIONS,
    };
    let mut recommendations: Vec<String> = base.iter().map(|s| s.to_string()).collect();
    if age > 65 {
        recommendations.push(ELDERLY_SCREENING_ACTION.to_string());
    }

    RiskAssessment {
        risk_score: score,
        risk_level: level,
        color: level.color_token(),
        recommendations,
        factors: Some(RiskFactors {
            age,
            history_count: inputs.history_count,
            admission_count: inputs.admission_count,
        }),
    }
}

fn unknown_assessment(recommendations: Vec<String>) -> RiskAssessment {
    RiskAssessment {
        risk_score: 0,
        risk_level: RiskLevel::Unknown,
        color: RiskLevel::Unknown.color_token(),
        recommendations,
        factors: None,
    }
}

/// Score the identified patient, degrading per the documented policy:
/// a missing patient and a failed fetch both yield an `Unknown` assessment
/// rather than an error.
pub fn patient_risk(conn: &Connection, patient_id: i64) -> Derived<RiskAssessment> {
    match db::get_risk_inputs(conn, patient_id) {
        Ok(Some(inputs)) => Derived::computed(score_risk(&inputs)),
        Ok(None) => Derived::degraded(unknown_assessment(vec![]), FallbackReason::SubjectNotFound),
        Err(e) => {
            tracing::warn!("Risk inputs unavailable for patient {patient_id}: {e}");
            Derived::degraded(
                unknown_assessment(vec!["Unable to calculate risk".into()]),
                FallbackReason::DataUnavailable,
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Health-score insight
// ---------------------------------------------------------------------------

/// Deduct from 100 for age band, visit depth and admission count.
/// Floored at 40.
pub fn health_score(age: Option<u32>, total_visits: u32, total_admissions: u32) -> u32 {
    let age = age.unwrap_or(DEFAULT_AGE);
    let mut score: i64 = 100;
    if age > 70 {
        score -= 15;
    } else if age > 60 {
        score -= 10;
    }
    score -= i64::from(total_visits.saturating_mul(3).min(30));
    score -= i64::from(total_admissions.saturating_mul(5).min(25));
    score.max(40) as u32
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthInsight {
    pub patient: Patient,
    pub health_score: u32,
    pub total_visits: u32,
    pub total_admissions: u32,
    pub last_visit: Option<NaiveDateTime>,
    pub last_admission: Option<NaiveDateTime>,
}

/// Assemble the health-score insight for one patient. None when the patient
/// does not exist; never an error.
pub fn health_insight(conn: &Connection, patient_id: i64) -> Derived<Option<HealthInsight>> {
    let assembled = || -> Result<Option<HealthInsight>, crate::db::DatabaseError> {
        let Some(patient) = db::get_patient(conn, patient_id)? else {
            return Ok(None);
        };
        let (total_visits, last_visit) = db::get_visit_summary(conn, patient_id)?;
        let (total_admissions, last_admission) = db::get_admission_summary(conn, patient_id)?;
        Ok(Some(HealthInsight {
            health_score: health_score(patient.age, total_visits, total_admissions),
            patient,
            total_visits,
            total_admissions,
            last_visit,
            last_admission,
        }))
    };

    match assembled() {
        Ok(Some(insight)) => Derived::computed(Some(insight)),
        Ok(None) => Derived::degraded(None, FallbackReason::SubjectNotFound),
        Err(e) => {
            tracing::warn!("Health insight unavailable for patient {patient_id}: {e}");
            Derived::degraded(None, FallbackReason::DataUnavailable)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::db::test_support::{seed_admission, seed_history, seed_patient};
    use crate::models::enums::Gender;

    fn inputs(age: Option<u32>, history: u32, admissions: u32) -> RiskInputs {
        RiskInputs {
            age,
            gender: Gender::Other,
            history_count: history,
            admission_count: admissions,
        }
    }

    #[test]
    fn age_band_contributions() {
        for (age, expected) in [(71, 30), (61, 20), (51, 10), (4, 15)] {
            let a = score_risk(&inputs(Some(age), 0, 0));
            assert_eq!(a.risk_score, expected, "age {age}");
        }
    }

    #[test]
    fn mid_ages_contribute_nothing() {
        for age in [5, 23, 50] {
            let a = score_risk(&inputs(Some(age), 0, 0));
            assert_eq!(a.risk_score, 0, "age {age}");
        }
    }

    #[test]
    fn heavy_utilization_clamps_to_one_hundred() {
        let a = score_risk(&inputs(Some(75), 10, 10));
        // 30 + min(50, 35) + min(70, 35) = 100
        assert_eq!(a.risk_score, 100);
        assert_eq!(a.risk_level, RiskLevel::High);
        assert_eq!(a.color, "danger");
    }

    #[test]
    fn level_bands() {
        let mid = score_risk(&inputs(Some(71), 8, 0)); // 30 + min(40, 35) = 65
        assert_eq!(mid.risk_score, 65);
        assert_eq!(mid.risk_level, RiskLevel::Medium);

        let low = score_risk(&inputs(Some(30), 1, 0)); // 5
        assert_eq!(low.risk_level, RiskLevel::Low);
        assert_eq!(low.color, "success");

        let banded = score_risk(&inputs(Some(71), 8, 1)); // 30 + 35 + 7 = 72
        assert_eq!(banded.risk_level, RiskLevel::High);
    }

    #[test]
    fn missing_age_defaults_to_thirty() {
        let a = score_risk(&inputs(None, 0, 0));
        assert_eq!(a.risk_score, 0);
        assert_eq!(a.factors.unwrap().age, 30);
    }

    #[test]
    fn elderly_get_screening_recommendation() {
        let a = score_risk(&inputs(Some(66), 0, 0));
        assert_eq!(a.recommendations.len(), 4);
        assert_eq!(a.recommendations[3], ELDERLY_SCREENING_ACTION);

        let b = score_risk(&inputs(Some(65), 0, 0));
        assert_eq!(b.recommendations.len(), 3);
    }

    #[test]
    fn scoring_is_idempotent() {
        let i = inputs(Some(72), 3, 2);
        assert_eq!(score_risk(&i), score_risk(&i));
    }

    #[test]
    fn facade_scores_seeded_patient() {
        let conn = open_memory_database().unwrap();
        let id = seed_patient(&conn, "Asha Verma", Some(72), "female");
        seed_history(&conn, id, "diabetes", "-10 days");
        seed_admission(&conn, id, "-5 days", None);

        let risk = patient_risk(&conn, id);
        assert!(!risk.is_fallback());
        // 30 (age) + 5 (history) + 7 (admission) = 42
        assert_eq!(risk.value.risk_score, 42);
        assert_eq!(risk.value.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn facade_missing_patient_degrades() {
        let conn = open_memory_database().unwrap();
        let risk = patient_risk(&conn, 404);
        assert_eq!(risk.fallback, Some(FallbackReason::SubjectNotFound));
        assert_eq!(risk.value.risk_level, RiskLevel::Unknown);
        assert_eq!(risk.value.color, "secondary");
        assert!(risk.value.recommendations.is_empty());
    }

    #[test]
    fn facade_broken_store_degrades() {
        let conn = open_memory_database().unwrap();
        conn.execute_batch("DROP TABLE medical_history").unwrap();
        let risk = patient_risk(&conn, 1);
        assert_eq!(risk.fallback, Some(FallbackReason::DataUnavailable));
        assert_eq!(
            risk.value.recommendations,
            vec!["Unable to calculate risk".to_string()]
        );
    }

    #[test]
    fn health_score_floors_at_forty() {
        // 100 - 15 - min(36, 30) - min(40, 25) = 30, floored
        assert_eq!(health_score(Some(75), 12, 8), 40);
    }

    #[test]
    fn health_score_deducts_by_band() {
        assert_eq!(health_score(Some(65), 2, 1), 100 - 10 - 6 - 5);
        assert_eq!(health_score(Some(40), 0, 0), 100);
        assert_eq!(health_score(None, 0, 0), 100);
    }

    #[test]
    fn health_insight_for_seeded_patient() {
        let conn = open_memory_database().unwrap();
        let id = seed_patient(&conn, "Asha Verma", Some(64), "female");
        seed_history(&conn, id, "asthma", "-10 days");

        let insight = health_insight(&conn, id);
        assert!(!insight.is_fallback());
        let insight = insight.value.unwrap();
        assert_eq!(insight.total_visits, 1);
        assert_eq!(insight.total_admissions, 0);
        assert_eq!(insight.health_score, 100 - 10 - 3);
        assert!(insight.last_visit.is_some());
        assert!(insight.last_admission.is_none());
    }

    #[test]
    fn health_insight_missing_patient_degrades() {
        let conn = open_memory_database().unwrap();
        let insight = health_insight(&conn, 404);
        assert_eq!(insight.fallback, Some(FallbackReason::SubjectNotFound));
        assert!(insight.value.is_none());
    }
}
