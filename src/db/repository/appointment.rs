//! OPD appointment aggregates.

use rusqlite::Connection;

use crate::db::DatabaseError;

/// Appointments falling on the current calendar day.
pub fn todays_appointment_count(conn: &Connection) -> Result<u32, DatabaseError> {
    conn.query_row(
        "SELECT COUNT(*) FROM opd_appointments WHERE DATE(scheduled_at) = DATE('now')",
        [],
        |row| row.get(0),
    )
    .map_err(DatabaseError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::db::test_support::{seed_appointment, seed_patient};

    #[test]
    fn counts_only_today() {
        let conn = open_memory_database().unwrap();
        let p = seed_patient(&conn, "P", Some(40), "male");
        seed_appointment(&conn, p, None, "+0 hours");
        seed_appointment(&conn, p, None, "-3 days");
        assert_eq!(todays_appointment_count(&conn).unwrap(), 1);
    }
}
