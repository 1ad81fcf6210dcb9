use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use labtrack_core::api::ApiResponse;
use labtrack_core::study::{study_error_to_status_code, StudyError};

/// Handler error. Renders a [`StudyError`] as the JSON envelope.
#[derive(Debug)]
pub struct ApiError(pub StudyError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(study_error_to_status_code(&self.0))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.0, "Request rejected");
        }

        let body = match self.0 {
            StudyError::Validation(errors) => {
                ApiResponse::failure("Validation failed").with_field_errors(errors)
            }
            StudyError::Upload(detail) => {
                ApiResponse::failure("Error uploading file").with_error(detail)
            }
            StudyError::Configuration(detail) => {
                ApiResponse::failure("Server configuration error").with_error(detail)
            }
            err if status.is_server_error() => {
                ApiResponse::failure("Internal server error").with_error(err.to_string())
            }
            err => ApiResponse::failure(err.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<StudyError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
