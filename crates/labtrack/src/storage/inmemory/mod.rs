//! In-memory storage backend.
//!
//! Stores users, statuses and studies in HashMaps wrapped in
//! `Arc<RwLock<_>>`. Nothing is persisted; useful for development and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use labtrack::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! seed_statuses(&repo).await?;
//! ```

mod repository;

pub use repository::InMemoryRepository;
