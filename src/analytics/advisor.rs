//! Rule-triggered resource advisories over a utilization snapshot.

use rusqlite::Connection;
use serde::Serialize;

use crate::db;
use crate::models::ResourceSnapshot;

use super::{Derived, FallbackReason};

/// Bed occupancy above this percentage is a critical alert.
const HIGH_OCCUPANCY_PCT: f64 = 90.0;
/// Bed occupancy below this percentage is an under-utilization note.
const LOW_OCCUPANCY_PCT: f64 = 30.0;
/// Pending operations above this count trigger a theatre alert.
const PENDING_OPERATIONS_LIMIT: u32 = 10;
/// Appointments above this count trigger a staffing note.
const DAILY_APPOINTMENT_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdviceKind {
    Critical,
    Warning,
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvicePriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    #[serde(rename = "type")]
    pub kind: AdviceKind,
    pub category: &'static str,
    pub message: String,
    pub priority: AdvicePriority,
}

/// Evaluate every advisory rule against the snapshot. When no rule fires,
/// the single all-optimal entry is returned instead of an empty list.
pub fn advise(snapshot: &ResourceSnapshot) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    let utilization = if snapshot.total_beds == 0 {
        0.0
    } else {
        f64::from(snapshot.occupied_beds) / f64::from(snapshot.total_beds) * 100.0
    };

    if utilization > HIGH_OCCUPANCY_PCT {
        advisories.push(Advisory {
            kind: AdviceKind::Critical,
            category: "Bed Management",
            message: "General ward occupancy is very high (>90%). Consider expediting \
                      discharges or arranging additional beds."
                .into(),
            priority: AdvicePriority::High,
        });
    } else if utilization < LOW_OCCUPANCY_PCT {
        advisories.push(Advisory {
            kind: AdviceKind::Info,
            category: "Bed Management",
            message: "General ward occupancy is low (<30%). Resources can be optimized.".into(),
            priority: AdvicePriority::Low,
        });
    }

    if snapshot.pending_operations > PENDING_OPERATIONS_LIMIT {
        advisories.push(Advisory {
            kind: AdviceKind::Warning,
            category: "Operation Theatre",
            message: format!(
                "{} operations pending. Consider scheduling additional OT time.",
                snapshot.pending_operations
            ),
            priority: AdvicePriority::Medium,
        });
    }

    if snapshot.todays_appointments > DAILY_APPOINTMENT_LIMIT {
        advisories.push(Advisory {
            kind: AdviceKind::Info,
            category: "OPD Management",
            message: format!(
                "{} appointments today. Ensure adequate staff allocation.",
                snapshot.todays_appointments
            ),
            priority: AdvicePriority::Medium,
        });
    }

    if advisories.is_empty() {
        advisories.push(Advisory {
            kind: AdviceKind::Success,
            category: "System Status",
            message: "All resources are optimally utilized. No immediate actions required."
                .into(),
            priority: AdvicePriority::Low,
        });
    }

    advisories
}

/// Collect the snapshot and advise; a failed collection yields exactly one
/// generic error entry, never a raised error.
pub fn resource_suggestions(conn: &Connection) -> Derived<Vec<Advisory>> {
    match db::get_resource_snapshot(conn) {
        Ok(snapshot) => Derived::computed(advise(&snapshot)),
        Err(e) => {
            tracing::warn!("Resource snapshot unavailable: {e}");
            Derived::degraded(
                vec![Advisory {
                    kind: AdviceKind::Error,
                    category: "System",
                    message: "Unable to generate optimization suggestions.".into(),
                    priority: AdvicePriority::Low,
                }],
                FallbackReason::DataUnavailable,
            )
        }
    }
}
