use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::Gender;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Gender,
    pub contact_info: Option<String>,
}

/// One prior condition/treatment pair from a patient's record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalHistoryEntry {
    pub id: i64,
    pub patient_id: i64,
    pub disease: Option<String>,
    pub treatment: Option<String>,
    pub recorded_at: NaiveDateTime,
}
