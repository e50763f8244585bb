//! Per-staff workload rows. Ranking happens in the analytics engine;
//! this fetch returns one unordered row per staff member.

use rusqlite::Connection;

use crate::db::DatabaseError;
use crate::models::StaffWorkload;

pub fn get_staff_workloads(conn: &Connection) -> Result<Vec<StaffWorkload>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT s.name AS staff_name, r.name AS role_name,
                COUNT(DISTINCT o.id) AS opd_count,
                COUNT(DISTINCT os.operation_id) AS ot_count
         FROM staff s
         LEFT JOIN staff_roles r ON s.role_id = r.id
         LEFT JOIN opd_appointments o ON o.staff_id = s.id
         LEFT JOIN operation_staff os ON os.staff_id = s.id
         GROUP BY s.id, s.name, r.name",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(StaffWorkload {
            staff_name: row.get("staff_name")?,
            role_name: row.get("role_name")?,
            opd_count: row.get("opd_count")?,
            ot_count: row.get("ot_count")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

pub fn staff_count(conn: &Connection) -> Result<u32, DatabaseError> {
    conn.query_row("SELECT COUNT(*) FROM staff", [], |row| row.get(0))
        .map_err(DatabaseError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::db::test_support::{
        assign_operation_staff, seed_appointment, seed_operation, seed_patient, seed_staff,
    };

    #[test]
    fn workload_counts_appointments_and_operations() {
        let conn = open_memory_database().unwrap();
        let p = seed_patient(&conn, "P", Some(40), "male");
        let doc = seed_staff(&conn, "Dr. Rao", Some("Surgeon"));
        seed_appointment(&conn, p, Some(doc), "-1 days");
        seed_appointment(&conn, p, Some(doc), "-2 days");
        let op = seed_operation(&conn, p, "hernia repair", "scheduled");
        assign_operation_staff(&conn, op, doc);

        let rows = get_staff_workloads(&conn).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].staff_name, "Dr. Rao");
        assert_eq!(rows[0].role_name.as_deref(), Some("Surgeon"));
        assert_eq!(rows[0].opd_count, 2);
        assert_eq!(rows[0].ot_count, 1);
        assert_eq!(rows[0].total_workload(), 3);
    }

    #[test]
    fn staff_without_assignments_counts_zero() {
        let conn = open_memory_database().unwrap();
        seed_staff(&conn, "Idle Nurse", None);
        let rows = get_staff_workloads(&conn).unwrap();
        assert_eq!(rows[0].opd_count, 0);
        assert_eq!(rows[0].ot_count, 0);
        assert_eq!(staff_count(&conn).unwrap(), 1);
    }
}
