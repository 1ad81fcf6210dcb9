//! labtrack_client - CLI client for the labtrack API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::LabtrackClient;
pub use error::{ClientError, Result};
