use async_trait::async_trait;

use crate::study::{NewStudy, Status, Study};
use crate::user::User;

use super::Result;

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by id.
    async fn get_user(&self, id: i64) -> Result<Option<User>>;

    /// Gets a user by national document number.
    async fn get_user_by_dni(&self, dni: &str) -> Result<Option<User>>;

    /// Gets a user by email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Inserts a user, keeping the id it carries.
    async fn create_user(&self, user: &User) -> Result<()>;
}

/// Repository for the status reference table.
#[async_trait]
pub trait StatusRepository: Send + Sync {
    async fn get_status(&self, id: i64) -> Result<Option<Status>>;

    /// Exact, case-sensitive name lookup.
    async fn get_status_by_name(&self, name: &str) -> Result<Option<Status>>;

    /// All statuses ordered by id.
    async fn list_statuses(&self) -> Result<Vec<Status>>;

    /// Inserts a status. Fails with `AlreadyExists` on a duplicate name.
    async fn create_status(&self, name: &str) -> Result<Status>;
}

/// Repository for studies.
///
/// List operations return studies newest first: `created_at` descending,
/// then id descending.
#[async_trait]
pub trait StudyRepository: Send + Sync {
    /// Inserts a study and returns it with its assigned id and timestamps.
    async fn create_study(&self, study: NewStudy) -> Result<Study>;

    async fn get_study(&self, id: i64) -> Result<Option<Study>>;

    async fn list_by_biochemist(&self, biochemist_id: i64) -> Result<Vec<Study>>;

    async fn list_by_patient(&self, patient_id: i64) -> Result<Vec<Study>>;

    async fn list_all(&self) -> Result<Vec<Study>>;

    /// Sets the status and bumps `updated_at`. `NotFound` if the study is missing.
    async fn update_study_status(&self, id: i64, status_id: i64) -> Result<Study>;

    /// Sets the PDF url and bumps `updated_at`. `NotFound` if the study is missing.
    async fn update_study_pdf(&self, id: i64, pdf_url: &str) -> Result<Study>;

    /// Removes a study. `NotFound` if the study is missing.
    async fn delete_study(&self, id: i64) -> Result<()>;
}
