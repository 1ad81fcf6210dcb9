//! SQLite repository implementation.
//!
//! Implements the repository traits from `labtrack_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use labtrack_core::storage::{
    RepositoryError, Result, StatusRepository, StudyRepository, UserRepository,
};
use labtrack_core::study::{NewStudy, Status, Study};
use labtrack_core::user::User;

use super::conversions::{format_date, format_datetime, row_to_status, row_to_study, row_to_user};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Reads one study by id inside a connection closure.
fn fetch_study(conn: &rusqlite::Connection, id: i64) -> tokio_rusqlite::Result<Study> {
    conn.query_row(&schema::select_study_by_id(), [id], row_to_study)
        .map_err(wrap_err)
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all entity types.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn query_user(&self, sql: &'static str, key: String) -> Result<Option<User>> {
        let id = key.clone();
        self.conn
            .call(move |conn| {
                conn.query_row(sql, [&key], row_to_user)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id))
    }

    async fn query_studies(&self, sql: String, key: Option<i64>) -> Result<Vec<Study>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
                let rows = match key {
                    Some(key) => stmt.query_map([key], row_to_study),
                    None => stmt.query_map([], row_to_study),
                }
                .map_err(wrap_err)?;

                let mut studies = Vec::new();
                for row_result in rows {
                    studies.push(row_result.map_err(wrap_err)?);
                }
                Ok(studies)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Study"))
    }

    /// Runs a single-row study update and reads the row back.
    async fn update_study(
        &self,
        sql: &'static str,
        id: i64,
        value: rusqlite::types::Value,
    ) -> Result<Study> {
        let updated_at = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(sql, rusqlite::params![id, value, updated_at])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                fetch_study(conn, id)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Study", id.to_string()))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_USER_BY_ID, [id], row_to_user)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id.to_string()))
    }

    async fn get_user_by_dni(&self, dni: &str) -> Result<Option<User>> {
        self.query_user(schema::SELECT_USER_BY_DNI, dni.to_string())
            .await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.query_user(schema::SELECT_USER_BY_EMAIL, email.to_string())
            .await
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let user = user.clone();
        let user_id = user.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_USER,
                    rusqlite::params![
                        user.id,
                        user.email,
                        user.dni,
                        user.role.as_str(),
                        user.profile.first_name,
                        user.profile.last_name,
                        user.profile.document_number
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", user_id))
    }
}

// ============================================================================
// StatusRepository implementation
// ============================================================================

#[async_trait]
impl StatusRepository for SqliteRepository {
    async fn get_status(&self, id: i64) -> Result<Option<Status>> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_STATUS_BY_ID, [id], row_to_status)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Status", id.to_string()))
    }

    async fn get_status_by_name(&self, name: &str) -> Result<Option<Status>> {
        let name = name.to_string();
        let status_name = name.clone();

        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_STATUS_BY_NAME, [&name], row_to_status)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Status", status_name))
    }

    async fn list_statuses(&self) -> Result<Vec<Status>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_STATUSES).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_status).map_err(wrap_err)?;

                let mut statuses = Vec::new();
                for row_result in rows {
                    statuses.push(row_result.map_err(wrap_err)?);
                }
                Ok(statuses)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Status"))
    }

    async fn create_status(&self, name: &str) -> Result<Status> {
        let name = name.to_string();
        let status_name = name.clone();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_STATUS, [&name]).map_err(wrap_err)?;
                Ok(Status::new(conn.last_insert_rowid(), name))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Status", status_name))
    }
}

// ============================================================================
// StudyRepository implementation
// ============================================================================

#[async_trait]
impl StudyRepository for SqliteRepository {
    async fn create_study(&self, study: NewStudy) -> Result<Study> {
        let now = format_datetime(&Utc::now());
        let study_date = format_date(&study.study_date);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_STUDY,
                    rusqlite::params![
                        study.patient_id,
                        study.biochemist_id,
                        study.study_name,
                        study_date,
                        study.social_insurance,
                        study.status_id,
                        study.pdf_url,
                        now,
                        now
                    ],
                )
                .map_err(wrap_err)?;
                fetch_study(conn, conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Study"))
    }

    async fn get_study(&self, id: i64) -> Result<Option<Study>> {
        self.conn
            .call(move |conn| {
                conn.query_row(&schema::select_study_by_id(), [id], row_to_study)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Study", id.to_string()))
    }

    async fn list_by_biochemist(&self, biochemist_id: i64) -> Result<Vec<Study>> {
        self.query_studies(schema::select_studies_by_biochemist(), Some(biochemist_id))
            .await
    }

    async fn list_by_patient(&self, patient_id: i64) -> Result<Vec<Study>> {
        self.query_studies(schema::select_studies_by_patient(), Some(patient_id))
            .await
    }

    async fn list_all(&self) -> Result<Vec<Study>> {
        self.query_studies(schema::select_all_studies(), None).await
    }

    async fn update_study_status(&self, id: i64, status_id: i64) -> Result<Study> {
        self.update_study(schema::UPDATE_STUDY_STATUS, id, status_id.into())
            .await
    }

    async fn update_study_pdf(&self, id: i64, pdf_url: &str) -> Result<Study> {
        self.update_study(schema::UPDATE_STUDY_PDF, id, pdf_url.to_string().into())
            .await
    }

    async fn delete_study(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn.execute(schema::DELETE_STUDY, [id]).map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Study", id.to_string()))
    }
}
