//! Per-request aggregate rows handed to the analytics engine.
//!
//! Every type here is transient: built from a query result, consumed by one
//! scoring or summarizing function, then discarded. None of them carry
//! identity beyond the request that produced them.

use serde::{Deserialize, Serialize};

use super::enums::{Gender, OperationStatus};

/// The three signals the risk scorer reads for one patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskInputs {
    /// None when the patient record has no recorded age.
    pub age: Option<u32>,
    pub gender: Gender,
    pub history_count: u32,
    pub admission_count: u32,
}

/// One distinct disease with its occurrence count and average patient age.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseFrequency {
    pub disease: String,
    pub frequency: u32,
    pub avg_age: u32,
}

/// Per-staff appointment and theatre assignment counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffWorkload {
    pub staff_name: String,
    pub role_name: Option<String>,
    pub opd_count: u32,
    pub ot_count: u32,
}

impl StaffWorkload {
    /// Derived, never stored.
    pub fn total_workload(&self) -> u32 {
        self.opd_count + self.ot_count
    }
}

/// Point-in-time utilization scalars read by the optimization advisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub occupied_beds: u32,
    pub total_beds: u32,
    pub pending_operations: u32,
    pub todays_appointments: u32,
}

/// Patients per age bracket, in fixed bracket order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeGroupCount {
    pub age_group: &'static str,
    pub count: u32,
}

/// Patients per gender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderCount {
    pub gender: Gender,
    pub count: u32,
}

/// Operations per status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationStatusCount {
    pub status: OperationStatus,
    pub count: u32,
}
