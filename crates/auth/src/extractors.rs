//! Axum extractors for authentication.
//!
//! Each extractor resolves the caller into an explicit [`User`] value, so
//! handlers never read identity from ambient request state.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use labtrack_core::auth::{
    is_session_expired, require_role, AuthError as CoreError, SessionId,
};
use labtrack_core::user::{Role, User};

use crate::{AuthError, AuthState};

/// Reads the session token: `Authorization: Bearer` first, then the cookie.
fn session_token(parts: &Parts, state: &AuthState) -> Result<SessionId, AuthError> {
    if let Some(auth_header) = parts.headers.get(AUTHORIZATION) {
        let header_value = auth_header.to_str().map_err(|_| CoreError::InvalidToken)?;

        return header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| SessionId::new(token.to_string()))
            .ok_or_else(|| CoreError::InvalidToken.into());
    }

    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(&state.config.cookie_name)
        .map(|cookie| SessionId::new(cookie.value().to_string()))
        .ok_or_else(|| CoreError::MissingCredentials.into())
}

async fn authenticate(parts: &Parts, state: &AuthState) -> Result<(User, SessionId), AuthError> {
    let session_id = session_token(parts, state)?;

    let session = state
        .sessions
        .get_session(&session_id)
        .await?
        .ok_or(CoreError::SessionNotFound)?;

    if is_session_expired(&session, Utc::now()) {
        if let Err(e) = state.sessions.delete_session(&session_id).await {
            tracing::warn!(error = %e, "Failed to delete expired session");
        }
        return Err(CoreError::SessionExpired.into());
    }

    let user = state
        .users
        .get_user(session.user_id)
        .await?
        .ok_or(CoreError::UserNotFound)?;

    Ok((user, session_id))
}

async fn authenticate_as(parts: &Parts, state: &AuthState, role: Role) -> Result<User, AuthError> {
    let (user, _) = authenticate(parts, state).await?;
    if let Err(err) = require_role(&user, role) {
        tracing::warn!(user_id = user.id, role = %user.role, required = %role, "Role check failed");
        return Err(err.into());
    }
    Ok(user)
}

/// Any authenticated user. Rejects with 401.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let (user, _) = authenticate(parts, &auth_state).await?;
        Ok(CurrentUser(user))
    }
}

/// Authenticated user together with the session id that authenticated it.
pub struct CurrentSession {
    pub user: User,
    pub session_id: SessionId,
}

impl<S> FromRequestParts<S> for CurrentSession
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let (user, session_id) = authenticate(parts, &auth_state).await?;
        Ok(CurrentSession { user, session_id })
    }
}

/// Authenticated BIOCHEMIST. Rejects with 401, or 403 for other roles.
pub struct RequireBiochemist(pub User);

impl<S> FromRequestParts<S> for RequireBiochemist
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        authenticate_as(parts, &auth_state, Role::Biochemist)
            .await
            .map(RequireBiochemist)
    }
}

/// Authenticated ADMIN. Rejects with 401, or 403 for other roles.
pub struct RequireAdmin(pub User);

impl<S> FromRequestParts<S> for RequireAdmin
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        authenticate_as(parts, &auth_state, Role::Admin)
            .await
            .map(RequireAdmin)
    }
}
