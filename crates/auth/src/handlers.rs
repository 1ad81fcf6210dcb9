//! HTTP handlers for auth routes.

#[cfg(feature = "mock")]
use axum::http::StatusCode;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use labtrack_core::api::ApiResponse;
use labtrack_core::user::User;
#[cfg(feature = "mock")]
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::extractors::{CurrentSession, CurrentUser};
use crate::AuthState;

/// Creates the auth router.
///
/// Routes:
/// - `GET /auth/me` - Get current authenticated user
/// - `POST /auth/logout` - End current session
/// - `POST /auth/logout-all` - End all sessions for current user
/// - `POST /auth/mock/login` - Issue a session by email (`mock` feature only)
pub fn auth_routes() -> Router<AuthState> {
    let router = Router::new()
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/auth/logout-all", post(logout_all));

    #[cfg(feature = "mock")]
    let router = router.route("/auth/mock/login", post(mock_login));

    router
}

async fn me(CurrentUser(user): CurrentUser) -> Json<ApiResponse<User>> {
    Json(ApiResponse::ok(user, "Authenticated user"))
}

async fn logout(
    State(state): State<AuthState>,
    session: CurrentSession,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<()>>), AuthError> {
    state.sessions.delete_session(&session.session_id).await?;
    tracing::info!(user_id = session.user.id, "Logged out");

    let jar = jar.remove(state.removal_cookie());
    Ok((jar, Json(ApiResponse::done("Logged out"))))
}

async fn logout_all(
    State(state): State<AuthState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<()>>), AuthError> {
    state.sessions.delete_user_sessions(user.id).await?;
    tracing::info!(user_id = user.id, "Logged out of all sessions");

    let jar = jar.remove(state.removal_cookie());
    Ok((jar, Json(ApiResponse::done("Logged out of all sessions"))))
}

#[cfg(feature = "mock")]
#[derive(Debug, Deserialize)]
struct MockLoginRequest {
    email: String,
}

#[cfg(feature = "mock")]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MockLoginResponse {
    token: String,
    expires_at: chrono::DateTime<chrono::Utc>,
    user: User,
}

/// Development login: issues a session for an existing account without a password.
#[cfg(feature = "mock")]
async fn mock_login(
    State(state): State<AuthState>,
    jar: CookieJar,
    Json(request): Json<MockLoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<MockLoginResponse>>), AuthError> {
    let user = state
        .users
        .get_user_by_email(request.email.trim())
        .await?
        .ok_or(labtrack_core::auth::AuthError::UserNotFound)?;

    let session = state.issue_session(user.id).await?;
    tracing::warn!(user_id = user.id, email = %user.email, "Mock login issued a session");

    let jar = jar.add(state.session_cookie(&session));
    let response = MockLoginResponse {
        token: session.id.to_string(),
        expires_at: session.expires_at,
        user,
    };

    Ok((
        StatusCode::OK,
        jar,
        Json(ApiResponse::ok(response, "Logged in")),
    ))
}
