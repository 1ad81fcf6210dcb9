//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `labtrack_core::storage`. The backend is selected at compile
//! time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): HashMaps behind `tokio::sync::RwLock`, lost on exit
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p labtrack --no-default-features --features sqlite
//! ```

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

use labtrack_core::storage::{RepositoryError, Result, StatusRepository};
use labtrack_core::study::STATUS_NAMES;

/// Inserts every reference status that is not stored yet.
///
/// Returns how many rows were created.
pub async fn seed_statuses(statuses: &dyn StatusRepository) -> Result<usize> {
    let mut created = 0;

    for name in STATUS_NAMES {
        if statuses.get_status_by_name(name).await?.is_some() {
            continue;
        }
        match statuses.create_status(name).await {
            Ok(status) => {
                tracing::debug!(status_id = status.id, name, "Seeded status");
                created += 1;
            }
            // Another instance seeded it between the lookup and the insert.
            Err(RepositoryError::AlreadyExists { .. }) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(created)
}
