use thiserror::Error;

use crate::api::FieldError;
use crate::storage::{repository_error_to_status_code, RepositoryError};

/// Errors raised by study operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StudyError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("Invalid study id")]
    InvalidId,
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("Error uploading file: {0}")]
    Upload(String),
    #[error("A PDF file is required")]
    MissingFile,
    /// The argument names the missing entity, e.g. `"Study"`.
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("The specified user is not a biochemist")]
    NotABiochemist,
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("File storage error: {0}")]
    FileStorage(String),
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl StudyError {
    /// Field errors carried by a validation failure.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            StudyError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Maps a [`StudyError`] to an HTTP status code.
///
/// ```
/// use labtrack_core::study::{StudyError, study_error_to_status_code};
///
/// assert_eq!(study_error_to_status_code(&StudyError::NotABiochemist), 422);
/// assert_eq!(study_error_to_status_code(&StudyError::NotFound("Study")), 404);
/// ```
pub fn study_error_to_status_code(error: &StudyError) -> u16 {
    match error {
        StudyError::Validation(_)
        | StudyError::InvalidId
        | StudyError::InvalidBody(_)
        | StudyError::Upload(_)
        | StudyError::MissingFile => 400,
        StudyError::Forbidden(_) => 403,
        StudyError::NotFound(_) => 404,
        StudyError::NotABiochemist => 422,
        StudyError::Configuration(_) | StudyError::FileStorage(_) => 500,
        StudyError::Storage(e) => repository_error_to_status_code(e),
    }
}
