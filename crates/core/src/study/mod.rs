mod access;
pub mod board;
mod error;
mod format;
mod requests;
mod types;
mod validation;

pub use access::{can_manage_study, can_update_status, can_view_study};
pub use error::{study_error_to_status_code, StudyError};
pub use format::{PatientLookup, StudyView, UserSummary};
pub use requests::{CreateStudyForm, UpdateStatusRequest};
pub use types::{NewStudy, Status, Study, STATUS_NAMES};
pub use validation::{parse_study_date, parse_study_id, validate_create_study, ValidStudyInput};
