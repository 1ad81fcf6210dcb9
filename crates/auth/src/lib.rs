//! Session authentication for labtrack.
//!
//! This crate provides:
//! - Bearer token and cookie session lookup
//! - Axum extractors that gate handlers by role
//! - Session storage (in-memory, or SQLite via the `sqlite` feature)
//! - `/auth` routes for the current user and logout

mod config;
mod error;
mod extractors;
mod handlers;
mod sessions;
mod state;

pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{CurrentSession, CurrentUser, RequireAdmin, RequireBiochemist};
pub use handlers::auth_routes;
pub use sessions::InMemorySessionStore;
#[cfg(feature = "sqlite")]
pub use sessions::SqliteSessionStore;
pub use state::AuthState;
