//! Dashboard view — statistics header, recent patients, today's schedule,
//! active admissions, and resource advisories.
//!
//! Provides the data layer for the landing screen. Card queries live here
//! rather than in the repository because their shapes are view-specific.

use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Serialize;

use crate::analytics::advisor::{resource_suggestions, Advisory};
use crate::analytics::Derived;
use crate::db::{self, DatabaseError};
use crate::models::Patient;

const RECENT_PATIENT_LIMIT: u32 = 5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Aggregated counts for the dashboard header.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_patients: u32,
    pub active_admissions: u32,
    pub today_appointments: u32,
    pub scheduled_operations: u32,
    pub total_staff: u32,
    pub icu_occupied: u32,
}

/// One entry on today's OPD schedule.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentCard {
    pub patient_name: String,
    pub staff_name: Option<String>,
    pub issue_description: Option<String>,
    pub scheduled_at: NaiveDateTime,
}

/// One currently admitted patient.
#[derive(Debug, Clone, Serialize)]
pub struct AdmissionCard {
    pub admission_id: i64,
    pub patient_name: String,
    pub age: Option<u32>,
    pub diagnosis: Option<String>,
    pub admitted_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub recent_patients: Vec<Patient>,
    pub today_appointments: Vec<AppointmentCard>,
    pub active_admissions: Vec<AdmissionCard>,
    pub advisories: Derived<Vec<Advisory>>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

pub fn get_dashboard_stats(conn: &Connection) -> Result<DashboardStats, DatabaseError> {
    Ok(DashboardStats {
        total_patients: db::patient_count(conn)?,
        active_admissions: db::active_admission_count(conn)?,
        today_appointments: db::todays_appointment_count(conn)?,
        scheduled_operations: db::pending_operation_count(conn)?,
        total_staff: db::staff_count(conn)?,
        icu_occupied: db::icu_occupied_count(conn)?,
    })
}

/// Today's appointments in schedule order.
pub fn get_today_appointments(conn: &Connection) -> Result<Vec<AppointmentCard>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT p.name AS patient_name, s.name AS staff_name,
                o.issue_description, o.scheduled_at
         FROM opd_appointments o
         JOIN patients p ON o.patient_id = p.id
         LEFT JOIN staff s ON o.staff_id = s.id
         WHERE DATE(o.scheduled_at) = DATE('now')
         ORDER BY o.scheduled_at",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(AppointmentCard {
            patient_name: row.get("patient_name")?,
            staff_name: row.get("staff_name")?,
            issue_description: row.get("issue_description")?,
            scheduled_at: row.get("scheduled_at")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Patients currently in a bed, most recent admission first.
pub fn get_active_admissions(conn: &Connection) -> Result<Vec<AdmissionCard>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.id AS admission_id, p.name AS patient_name, p.age,
                a.diagnosis, a.admitted_at
         FROM admissions a
         JOIN patients p ON a.patient_id = p.id
         WHERE a.discharged_at IS NULL
         ORDER BY a.admitted_at DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(AdmissionCard {
            admission_id: row.get("admission_id")?,
            patient_name: row.get("patient_name")?,
            age: row.get("age")?,
            diagnosis: row.get("diagnosis")?,
            admitted_at: row.get("admitted_at")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Top-level assembly: everything the landing screen renders, in one call.
pub fn get_dashboard_data(conn: &Connection) -> Result<DashboardData, DatabaseError> {
    Ok(DashboardData {
        stats: get_dashboard_stats(conn)?,
        recent_patients: db::get_recent_patients(conn, RECENT_PATIENT_LIMIT)?,
        today_appointments: get_today_appointments(conn)?,
        active_admissions: get_active_admissions(conn)?,
        advisories: resource_suggestions(conn),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
