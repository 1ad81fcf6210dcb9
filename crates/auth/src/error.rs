use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use labtrack_core::api::ApiResponse;
use labtrack_core::storage::RepositoryError;
use thiserror::Error;

/// Auth errors for the labtrack_auth crate.
///
/// Wraps the core `AuthError` and adds failures from the user store.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Core(#[from] labtrack_core::auth::AuthError),

    #[error("user lookup failed: {0}")]
    UserLookup(#[from] RepositoryError),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        use labtrack_core::auth::AuthError as CoreError;

        match self {
            AuthError::Core(core_err) => match core_err {
                CoreError::MissingCredentials
                | CoreError::InvalidToken
                | CoreError::SessionNotFound
                | CoreError::SessionExpired
                | CoreError::UserNotFound => StatusCode::UNAUTHORIZED,
                CoreError::InsufficientRole { .. } => StatusCode::FORBIDDEN,
                CoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AuthError::UserLookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = if status.is_server_error() {
            tracing::error!(error = %self, "Auth error");
            ApiResponse::failure("Internal server error").with_error(self.to_string())
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Auth rejected");
            ApiResponse::failure(self.to_string())
        };

        (status, Json(body)).into_response()
    }
}
