//! Disease frequency rows for the pattern summarizer.

use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::DiseaseFrequency;

/// Distinct diseases from the medical history, ranked by occurrence count
/// descending, with the average age of affected patients (0 when no ages
/// are recorded). Blank disease names are excluded.
pub fn get_disease_frequencies(
    conn: &Connection,
    limit: u32,
) -> Result<Vec<DiseaseFrequency>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT mh.disease AS disease, COUNT(*) AS frequency,
                CAST(COALESCE(ROUND(AVG(p.age), 0), 0) AS INTEGER) AS avg_age
         FROM medical_history mh
         LEFT JOIN patients p ON mh.patient_id = p.id
         WHERE mh.disease IS NOT NULL AND mh.disease != ''
         GROUP BY mh.disease
         ORDER BY frequency DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(DiseaseFrequency {
            disease: row.get("disease")?,
            frequency: row.get("frequency")?,
            avg_age: row.get("avg_age")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}
