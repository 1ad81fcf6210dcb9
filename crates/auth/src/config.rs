use std::time::Duration;

const DAY: u64 = 24 * 60 * 60;

/// Session and cookie configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_ttl: Duration,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(7 * DAY),
            cookie_name: "labtrack_session".to_string(),
            cookie_secure: true,
        }
    }
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// - `SESSION_TTL_DAYS`: Session TTL in days (default: 7)
    /// - `COOKIE_SECURE`: Whether to set secure flag on cookies (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let session_ttl = std::env::var("SESSION_TTL_DAYS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|days| Duration::from_secs(days * DAY))
            .unwrap_or(defaults.session_ttl);

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(defaults.cookie_secure);

        Self {
            session_ttl,
            cookie_secure,
            ..defaults
        }
    }

    /// Session TTL as a chrono duration.
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_ttl.as_secs() as i64)
    }
}
