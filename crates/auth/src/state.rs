//! Shared state for auth extractors and handlers.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use labtrack_core::auth::{new_session, Session, SessionRepository};
use labtrack_core::storage::UserRepository;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Session store, user store and cookie settings.
///
/// Host applications expose it to the extractors with `FromRef`.
#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<dyn SessionRepository>,
    pub users: Arc<dyn UserRepository>,
    pub config: AuthConfig,
}

impl AuthState {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        config: AuthConfig,
    ) -> Self {
        Self {
            sessions,
            users,
            config,
        }
    }

    /// Creates and stores a new session for `user_id`.
    pub async fn issue_session(&self, user_id: i64) -> Result<Session, AuthError> {
        let session = new_session(user_id, Utc::now(), self.config.ttl());
        self.sessions.create_session(&session).await?;
        tracing::debug!(user_id, expires_at = %session.expires_at, "Session issued");
        Ok(session)
    }

    /// Cookie carrying the session id.
    pub fn session_cookie(&self, session: &Session) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), session.id.to_string()))
            .path("/")
            .http_only(true)
            .secure(self.config.cookie_secure)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(
                self.config.session_ttl.as_secs() as i64
            ))
            .build()
    }

    /// Cookie that clears the session on the client.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build(self.config.cookie_name.clone()).path("/").build()
    }
}
