//! Operation theatre aggregates.

use rusqlite::Connection;

use crate::db::DatabaseError;
use crate::models::enums::OperationStatus;
use crate::models::OperationStatusCount;

use super::column_enum;

/// Operations grouped by status.
pub fn get_operation_status_counts(
    conn: &Connection,
) -> Result<Vec<OperationStatusCount>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT status, COUNT(*) AS count FROM operations GROUP BY status")?;
    let rows = stmt.query_map([], |row| {
        Ok(OperationStatusCount {
            status: column_enum(row, "status")?,
            count: row.get("count")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Scheduled-but-not-performed operation count.
pub fn pending_operation_count(conn: &Connection) -> Result<u32, DatabaseError> {
    conn.query_row(
        "SELECT COUNT(*) FROM operations WHERE status = 'scheduled'",
        [],
        |row| row.get(0),
    )
    .map_err(DatabaseError::from)
}
