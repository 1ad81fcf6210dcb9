//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::Row;

use labtrack_core::study::{Status, Study};
use labtrack_core::user::{Profile, Role, User};

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

/// Convert a SQLite row to a User.
///
/// Expected columns: id, email, dni, role, first_name, last_name, document_number
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let role: String = row.get(3)?;

    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        dni: row.get(2)?,
        role: parse_role(&role)?,
        profile: Profile {
            first_name: row.get(4)?,
            last_name: row.get(5)?,
            document_number: row.get(6)?,
        },
    })
}

/// Convert a SQLite row to a Status.
///
/// Expected columns: id, name
pub fn row_to_status(row: &Row) -> rusqlite::Result<Status> {
    Ok(Status::new(row.get(0)?, row.get::<_, String>(1)?))
}

/// Convert a SQLite row to a Study.
///
/// Expected columns: id, patient_id, biochemist_id, study_name, study_date,
/// social_insurance, status_id, pdf_url, created_at, updated_at
pub fn row_to_study(row: &Row) -> rusqlite::Result<Study> {
    let study_date: String = row.get(4)?;
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;

    Ok(Study {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        biochemist_id: row.get(2)?,
        study_name: row.get(3)?,
        study_date: parse_date(&study_date)?,
        social_insurance: row.get(5)?,
        status_id: row.get(6)?,
        pdf_url: row.get(7)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

fn parse_role(s: &str) -> rusqlite::Result<Role> {
    s.parse::<Role>().map_err(|e| conversion_error(3, e.to_string()))
}

fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| conversion_error(4, format!("Invalid date '{s}': {e}")))
}

fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(8, format!("Invalid datetime '{s}': {e}")))
}

/// Format a DateTime as fixed-width RFC 3339 (microseconds, `Z` suffix).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Format a NaiveDate as `YYYY-MM-DD`.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
