use std::{env, path::PathBuf};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "labtrack.db").
    /// Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Directory served under `/uploads` (default: "uploads")
    pub upload_dir: PathBuf,
    /// Largest accepted PDF in bytes (default: 10 MiB)
    pub upload_max_bytes: usize,
    /// CORS origins allowed to send credentials (default: "http://localhost:3001")
    pub allowed_origins: Vec<String>,
    /// Seed demo users and studies on start (default: false)
    pub demo_data: bool,
}

const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "labtrack.db")
    /// - `UPLOAD_DIR` - Upload root directory (default: "uploads")
    /// - `UPLOAD_MAX_BYTES` - Maximum PDF size (default: 10 MiB)
    /// - `ALLOWED_ORIGINS` - Comma-separated CORS origins (default: "http://localhost:3001")
    /// - `DEMO_DATA` - Seed demo data when "1" or "true" (default: off)
    pub fn from_env() -> Self {
        Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "labtrack.db".to_string()),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            upload_max_bytes: env::var("UPLOAD_MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_UPLOAD_MAX_BYTES),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .ok()
                .filter(|origins| !origins.is_empty())
                .unwrap_or_else(|| vec!["http://localhost:3001".to_string()]),
            demo_data: env::var("DEMO_DATA").map(|v| parse_flag(&v)).unwrap_or(false),
        }
    }

    /// Configuration rooted at `upload_dir`, with defaults everywhere else.
    #[cfg(test)]
    pub fn for_tests(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            sqlite_path: ":memory:".to_string(),
            upload_dir: upload_dir.into(),
            upload_max_bytes: 1024 * 1024,
            allowed_origins: vec!["http://localhost:3001".to_string()],
            demo_data: false,
        }
    }

    /// Directory where study PDFs are written.
    pub fn pdf_dir(&self) -> PathBuf {
        self.upload_dir.join("pdfs")
    }
}
