//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Storage is reached through repository trait objects and
//! the backend is chosen by feature flag.

use std::sync::Arc;

use axum::extract::FromRef;

use labtrack_auth::{AuthConfig, AuthState};
use labtrack_core::auth::SessionRepository;
use labtrack_core::storage::{StatusRepository, StudyRepository, UserRepository};

use crate::config::Config;
use crate::services::StudyService;
use crate::uploads::PdfStore;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Cannot enable both 'sqlite' and 'inmemory' storage features. \
    Example: cargo build -p labtrack --no-default-features --features sqlite"
);

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'sqlite'");

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    pub studies: StudyService,
    /// Status reference table, read by the health check.
    pub statuses: Arc<dyn StatusRepository>,
    pub users: Arc<dyn UserRepository>,
    pub auth: AuthState,
    /// Largest accepted PDF in bytes.
    pub upload_max_bytes: usize,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl AppState {
    /// Creates a new AppState from repositories and configuration.
    pub fn build(
        users: Arc<dyn UserRepository>,
        statuses: Arc<dyn StatusRepository>,
        studies: Arc<dyn StudyRepository>,
        sessions: Arc<dyn SessionRepository>,
        config: &Config,
        auth_config: AuthConfig,
    ) -> Self {
        let pdfs = PdfStore::new(config.pdf_dir());

        Self {
            studies: StudyService::new(users.clone(), statuses.clone(), studies, pdfs),
            statuses,
            auth: AuthState::new(sessions, users.clone(), auth_config),
            users,
            upload_max_bytes: config.upload_max_bytes,
        }
    }
}

// ============================================================================
// Factory functions for each storage backend
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use labtrack_auth::InMemorySessionStore;

    use crate::storage::{inmemory::InMemoryRepository, seed_statuses};

    impl AppState {
        /// Creates state backed by HashMaps, with the status table seeded.
        pub async fn new(config: &Config, auth_config: AuthConfig) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(InMemoryRepository::new());
            seed_statuses(repo.as_ref()).await?;

            tracing::info!("Using in-memory storage");

            Ok(Self::build(
                repo.clone(),
                repo.clone(),
                repo,
                Arc::new(InMemorySessionStore::new()),
                config,
                auth_config,
            ))
        }
    }
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use labtrack_auth::SqliteSessionStore;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

    use crate::storage::{seed_statuses, sqlite::SqliteRepository};

    impl AppState {
        /// Creates state backed by the SQLite file at `config.sqlite_path`.
        ///
        /// Sessions live in the same file, in their own table.
        pub async fn new(config: &Config, auth_config: AuthConfig) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            seed_statuses(repo.as_ref()).await?;

            let options = SqliteConnectOptions::new()
                .filename(&config.sqlite_path)
                .create_if_missing(true);
            let pool = SqlitePoolOptions::new()
                .max_connections(4)
                .connect_with(options)
                .await?;
            let sessions = SqliteSessionStore::new(pool);
            sessions.migrate().await?;

            tracing::info!(path = %config.sqlite_path, "Using SQLite storage");

            Ok(Self::build(
                repo.clone(),
                repo.clone(),
                repo,
                Arc::new(sessions),
                config,
                auth_config,
            ))
        }
    }
}
