//! Ward bed aggregates and the advisor's point-in-time resource snapshot.

use rusqlite::Connection;

use crate::config;
use crate::db::DatabaseError;
use crate::models::ResourceSnapshot;

use super::{pending_operation_count, todays_appointment_count};

/// General-ward beds currently holding a patient.
pub fn occupied_bed_count(conn: &Connection) -> Result<u32, DatabaseError> {
    conn.query_row(
        "SELECT COUNT(*) FROM ward_beds WHERE patient_id IS NOT NULL",
        [],
        |row| row.get(0),
    )
    .map_err(DatabaseError::from)
}

/// ICU beds currently tied to an admission.
pub fn icu_occupied_count(conn: &Connection) -> Result<u32, DatabaseError> {
    conn.query_row(
        "SELECT COUNT(*) FROM icu_beds WHERE admission_id IS NOT NULL",
        [],
        |row| row.get(0),
    )
    .map_err(DatabaseError::from)
}

/// The scalars the optimization advisor triggers on, gathered in one pass.
pub fn get_resource_snapshot(conn: &Connection) -> Result<ResourceSnapshot, DatabaseError> {
    Ok(ResourceSnapshot {
        occupied_beds: occupied_bed_count(conn)?,
        total_beds: config::GENERAL_WARD_BEDS,
        pending_operations: pending_operation_count(conn)?,
        todays_appointments: todays_appointment_count(conn)?,
    })
}
