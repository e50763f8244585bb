//! Repository layer — read-side aggregate and row fetches.
//!
//! Everything the analytics engine consumes is produced here, shaped as the
//! engine's input rows. Writes belong to the surrounding application; this
//! layer never mutates hospital records.

mod admission;
mod appointment;
mod disease;
mod patient;
mod staffing;
mod theatre;
mod ward;

pub use admission::*;
pub use appointment::*;
pub use disease::*;
pub use patient::*;
pub use staffing::*;
pub use theatre::*;
pub use ward::*;

use std::str::FromStr;

use rusqlite::Row;

use super::DatabaseError;

/// Read a TEXT column and parse it through a str_enum `FromStr`.
pub(crate) fn column_enum<T>(row: &Row<'_>, col: &str) -> rusqlite::Result<T>
where
    T: FromStr<Err = DatabaseError>,
{
    let raw: String = row.get(col)?;
    raw.parse().map_err(|e: DatabaseError| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
