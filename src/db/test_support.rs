//! Shared seeding helpers for repository and analytics tests.
//!
//! Offsets are SQLite datetime modifiers relative to now, e.g. "-3 days".

use rusqlite::{params, Connection};

pub fn seed_patient(conn: &Connection, name: &str, age: Option<u32>, gender: &str) -> i64 {
    conn.execute(
        "INSERT INTO patients (name, age, gender) VALUES (?1, ?2, ?3)",
        params![name, age, gender],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn seed_history(conn: &Connection, patient_id: i64, disease: &str, offset: &str) {
    conn.execute(
        "INSERT INTO medical_history (patient_id, disease, treatment, recorded_at)
         VALUES (?1, ?2, 'treated', datetime('now', ?3))",
        params![patient_id, disease, offset],
    )
    .unwrap();
}

pub fn seed_admission(
    conn: &Connection,
    patient_id: i64,
    admitted_offset: &str,
    discharged_offset: Option<&str>,
) -> i64 {
    conn.execute(
        "INSERT INTO admissions (patient_id, diagnosis, admitted_at, discharged_at)
         VALUES (?1, 'observation', datetime('now', ?2),
                 CASE WHEN ?3 IS NULL THEN NULL ELSE datetime('now', ?3) END)",
        params![patient_id, admitted_offset, discharged_offset],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn seed_staff(conn: &Connection, name: &str, role: Option<&str>) -> i64 {
    let role_id: Option<i64> = role.map(|r| {
        conn.execute(
            "INSERT OR IGNORE INTO staff_roles (name) VALUES (?1)",
            params![r],
        )
        .unwrap();
        conn.query_row(
            "SELECT id FROM staff_roles WHERE name = ?1",
            params![r],
            |row| row.get(0),
        )
        .unwrap()
    });
    conn.execute(
        "INSERT INTO staff (name, role_id, shift) VALUES (?1, ?2, 'day')",
        params![name, role_id],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn seed_appointment(conn: &Connection, patient_id: i64, staff_id: Option<i64>, offset: &str) {
    conn.execute(
        "INSERT INTO opd_appointments (patient_id, staff_id, issue_description, scheduled_at)
         VALUES (?1, ?2, 'checkup', datetime('now', ?3))",
        params![patient_id, staff_id, offset],
    )
    .unwrap();
}

pub fn seed_operation(conn: &Connection, patient_id: i64, procedure: &str, status: &str) -> i64 {
    conn.execute(
        "INSERT INTO operations (patient_id, scheduled_date, procedure_name, status)
         VALUES (?1, date('now', '+1 days'), ?2, ?3)",
        params![patient_id, procedure, status],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn assign_operation_staff(conn: &Connection, operation_id: i64, staff_id: i64) {
    conn.execute(
        "INSERT INTO operation_staff (operation_id, staff_id) VALUES (?1, ?2)",
        params![operation_id, staff_id],
    )
    .unwrap();
}

pub fn occupy_beds(conn: &Connection, patient_id: i64, count: u32) {
    for bed_no in 1..=count {
        conn.execute(
            "INSERT INTO ward_beds (bed_no, patient_id) VALUES (?1, ?2)",
            params![bed_no, patient_id],
        )
        .unwrap();
    }
}
