//! SQLite storage backend implementation.
//!
//! Implements the repository traits with `rusqlite` for synchronous
//! operations and `tokio-rusqlite` for async wrapping. All access goes
//! through a single connection.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
