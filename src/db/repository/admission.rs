//! Admission history aggregates: trailing daily counts, monthly trends,
//! stay duration and readmission scalars.

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{DailyAdmissions, MonthlyAdmissions};

/// Admissions per day over the trailing `days`-day window, oldest first.
/// Days with no admissions produce no row.
pub fn get_daily_admission_counts(
    conn: &Connection,
    days: u32,
) -> Result<Vec<DailyAdmissions>, DatabaseError> {
    let modifier = format!("-{days} days");
    let mut stmt = conn.prepare(
        "SELECT DATE(admitted_at) AS day, COUNT(*) AS admissions
         FROM admissions
         WHERE admitted_at >= datetime('now', ?1)
         GROUP BY day
         ORDER BY day",
    )?;
    let rows = stmt.query_map(params![modifier], |row| {
        Ok(DailyAdmissions {
            date: row.get("day")?,
            admissions: row.get("admissions")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Admissions per month over the trailing `months`-month window, oldest first.
pub fn get_monthly_admissions(
    conn: &Connection,
    months: u32,
) -> Result<Vec<MonthlyAdmissions>, DatabaseError> {
    let modifier = format!("-{months} months");
    let mut stmt = conn.prepare(
        "SELECT strftime('%Y-%m', admitted_at) AS month, COUNT(*) AS admissions
         FROM admissions
         WHERE admitted_at >= datetime('now', ?1)
         GROUP BY month
         ORDER BY month",
    )?;
    let rows = stmt.query_map(params![modifier], |row| {
        Ok(MonthlyAdmissions {
            month: row.get("month")?,
            admissions: row.get("admissions")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Mean stay length in days over discharged admissions. None when nothing
/// has been discharged yet.
pub fn get_average_stay_days(conn: &Connection) -> Result<Option<f64>, DatabaseError> {
    conn.query_row(
        "SELECT AVG(julianday(discharged_at) - julianday(admitted_at))
         FROM admissions WHERE discharged_at IS NOT NULL",
        [],
        |row| row.get(0),
    )
    .map_err(DatabaseError::from)
}

/// (distinct patients ever admitted, total admissions) — the readmission
/// rate's numerator lives in the difference.
pub fn get_admission_totals(conn: &Connection) -> Result<(u32, u32), DatabaseError> {
    conn.query_row(
        "SELECT COUNT(DISTINCT patient_id), COUNT(*) FROM admissions",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .map_err(DatabaseError::from)
}

/// Admission count and latest admission timestamp for one patient.
pub fn get_admission_summary(
    conn: &Connection,
    patient_id: i64,
) -> Result<(u32, Option<NaiveDateTime>), DatabaseError> {
    conn.query_row(
        "SELECT COUNT(*), MAX(admitted_at) FROM admissions WHERE patient_id = ?1",
        params![patient_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .map_err(DatabaseError::from)
}

/// Currently admitted (not yet discharged) count.
pub fn active_admission_count(conn: &Connection) -> Result<u32, DatabaseError> {
    conn.query_row(
        "SELECT COUNT(*) FROM admissions WHERE discharged_at IS NULL",
        [],
        |row| row.get(0),
    )
    .map_err(DatabaseError::from)
}
