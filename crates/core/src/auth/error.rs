use thiserror::Error;

use crate::user::Role;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing credentials")]
    MissingCredentials,

    #[error("invalid session token")]
    InvalidToken,

    #[error("session not found")]
    SessionNotFound,

    #[error("session expired")]
    SessionExpired,

    #[error("user not found")]
    UserNotFound,

    #[error("{required} role required")]
    InsufficientRole { required: Role },

    #[error("storage error: {0}")]
    Storage(String),
}
