//! Patient rows, medical history, and per-patient risk/insight aggregates.

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{GenderCount, MedicalHistoryEntry, Patient, RiskInputs};

use super::column_enum;

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    conn.query_row(
        "SELECT id, name, age, gender, contact_info FROM patients WHERE id = ?1",
        params![id],
        |row| {
            Ok(Patient {
                id: row.get("id")?,
                name: row.get("name")?,
                age: row.get("age")?,
                gender: column_enum(row, "gender")?,
                contact_info: row.get("contact_info")?,
            })
        },
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// Most recently registered patients first.
pub fn get_recent_patients(conn: &Connection, limit: u32) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, age, gender, contact_info
         FROM patients ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(Patient {
            id: row.get("id")?,
            name: row.get("name")?,
            age: row.get("age")?,
            gender: column_enum(row, "gender")?,
            contact_info: row.get("contact_info")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

pub fn patient_count(conn: &Connection) -> Result<u32, DatabaseError> {
    conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))
        .map_err(DatabaseError::from)
}

/// Full medical history for one patient, newest entries first.
pub fn get_patient_history(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<MedicalHistoryEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, disease, treatment, recorded_at
         FROM medical_history WHERE patient_id = ?1
         ORDER BY recorded_at DESC",
    )?;
    let rows = stmt.query_map(params![patient_id], |row| {
        Ok(MedicalHistoryEntry {
            id: row.get("id")?,
            patient_id: row.get("patient_id")?,
            disease: row.get("disease")?,
            treatment: row.get("treatment")?,
            recorded_at: row.get("recorded_at")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// The risk scorer's inputs for one patient: recorded age and gender plus
/// distinct history-entry and admission counts. None when the patient does
/// not exist.
pub fn get_risk_inputs(
    conn: &Connection,
    patient_id: i64,
) -> Result<Option<RiskInputs>, DatabaseError> {
    conn.query_row(
        "SELECT p.age, p.gender,
                COUNT(DISTINCT mh.id) AS history_count,
                COUNT(DISTINCT a.id) AS admission_count
         FROM patients p
         LEFT JOIN medical_history mh ON mh.patient_id = p.id
         LEFT JOIN admissions a ON a.patient_id = p.id
         WHERE p.id = ?1
         GROUP BY p.id",
        params![patient_id],
        |row| {
            Ok(RiskInputs {
                age: row.get("age")?,
                gender: column_enum(row, "gender")?,
                history_count: row.get("history_count")?,
                admission_count: row.get("admission_count")?,
            })
        },
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// Visit count and latest visit timestamp from the medical history.
pub fn get_visit_summary(
    conn: &Connection,
    patient_id: i64,
) -> Result<(u32, Option<NaiveDateTime>), DatabaseError> {
    conn.query_row(
        "SELECT COUNT(*), MAX(recorded_at) FROM medical_history WHERE patient_id = ?1",
        params![patient_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .map_err(DatabaseError::from)
}

/// Recorded ages of every patient (None where age was never captured).
pub fn get_patient_ages(conn: &Connection) -> Result<Vec<Option<u32>>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT age FROM patients")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Patients grouped by gender.
pub fn get_gender_distribution(conn: &Connection) -> Result<Vec<GenderCount>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT gender, COUNT(*) AS count FROM patients GROUP BY gender")?;
    let rows = stmt.query_map([], |row| {
        Ok(GenderCount {
            gender: column_enum(row, "gender")?,
            count: row.get("count")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::db::test_support::{seed_history, seed_patient};
    use crate::models::enums::Gender;

    #[test]
    fn missing_patient_is_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_patient(&conn, 404).unwrap().is_none());
        assert!(get_risk_inputs(&conn, 404).unwrap().is_none());
    }

    #[test]
    fn risk_inputs_count_distinct_rows() {
        let conn = open_memory_database().unwrap();
        let id = seed_patient(&conn, "Asha Verma", Some(64), "female");
        seed_history(&conn, id, "diabetes", "-10 days");
        seed_history(&conn, id, "hypertension", "-3 days");
        conn.execute(
            "INSERT INTO admissions (patient_id, diagnosis, admitted_at)
             VALUES (?1, 'observation', datetime('now', '-2 days'))",
            params![id],
        )
        .unwrap();

        let inputs = get_risk_inputs(&conn, id).unwrap().unwrap();
        assert_eq!(inputs.age, Some(64));
        assert_eq!(inputs.gender, Gender::Female);
        assert_eq!(inputs.history_count, 2);
        assert_eq!(inputs.admission_count, 1);
    }

    #[test]
    fn risk_inputs_age_can_be_absent() {
        let conn = open_memory_database().unwrap();
        let id = seed_patient(&conn, "Unknown Age", None, "other");
        let inputs = get_risk_inputs(&conn, id).unwrap().unwrap();
        assert_eq!(inputs.age, None);
        assert_eq!(inputs.history_count, 0);
        assert_eq!(inputs.admission_count, 0);
    }

    #[test]
    fn recent_patients_newest_first() {
        let conn = open_memory_database().unwrap();
        let a = seed_patient(&conn, "First", Some(30), "male");
        let b = seed_patient(&conn, "Second", Some(40), "female");
        let recent = get_recent_patients(&conn, 5).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, b);
        assert_eq!(recent[1].id, a);
        assert_eq!(patient_count(&conn).unwrap(), 2);
    }

    #[test]
    fn history_is_newest_first() {
        let conn = open_memory_database().unwrap();
        let id = seed_patient(&conn, "Asha Verma", Some(64), "female");
        seed_history(&conn, id, "fever", "-20 days");
        seed_history(&conn, id, "asthma", "-1 days");
        let history = get_patient_history(&conn, id).unwrap();
        assert_eq!(history[0].disease.as_deref(), Some("asthma"));
        assert_eq!(history[1].disease.as_deref(), Some("fever"));

        let (visits, last) = get_visit_summary(&conn, id).unwrap();
        assert_eq!(visits, 2);
        assert!(last.is_some());
    }

    #[test]
    fn gender_distribution_groups() {
        let conn = open_memory_database().unwrap();
        seed_patient(&conn, "A", Some(30), "male");
        seed_patient(&conn, "B", Some(40), "male");
        seed_patient(&conn, "C", Some(50), "female");
        let dist = get_gender_distribution(&conn).unwrap();
        let male = dist.iter().find(|g| g.gender == Gender::Male).unwrap();
        assert_eq!(male.count, 2);
    }
}
