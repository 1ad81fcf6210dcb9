//! Functional core for labtrack.
//!
//! Pure domain types, validation, access rules and formatting shared by the
//! server, the auth layer and the CLI client. Nothing in here performs I/O;
//! the storage and session seams are traits implemented elsewhere.

pub mod api;
#[cfg(feature = "auth")]
pub mod auth;
pub mod fields;
pub mod storage;
pub mod study;
pub mod user;
