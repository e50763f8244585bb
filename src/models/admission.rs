use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An inpatient stay. `discharged_at` is None while the patient is admitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admission {
    pub id: i64,
    pub patient_id: i64,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub admitted_at: NaiveDateTime,
    pub discharged_at: Option<NaiveDateTime>,
}

/// Admissions per calendar day, from the trailing history window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAdmissions {
    pub date: NaiveDate,
    pub admissions: u32,
}

/// Admissions per calendar month (`month` as "YYYY-MM").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyAdmissions {
    pub month: String,
    pub admissions: u32,
}
