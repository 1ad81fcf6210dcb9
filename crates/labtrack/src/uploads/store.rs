use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Public path prefix under which stored PDFs are served.
pub const PDF_URL_PREFIX: &str = "/uploads/pdfs/";

/// A PDF written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPdf {
    pub filename: String,
    pub url: String,
}

/// Writes study PDFs into a single directory.
#[derive(Debug, Clone)]
pub struct PdfStore {
    dir: PathBuf,
}

impl PdfStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// `study-<unix millis>-<uuid simple>.pdf`
    pub fn generate_filename(now: DateTime<Utc>) -> String {
        format!(
            "study-{}-{}.pdf",
            now.timestamp_millis(),
            Uuid::new_v4().simple()
        )
    }

    /// Writes `bytes` under a fresh filename.
    pub async fn save(&self, bytes: &[u8]) -> io::Result<StoredPdf> {
        self.ensure_dir().await?;

        let filename = Self::generate_filename(Utc::now());
        tokio::fs::write(self.dir.join(&filename), bytes).await?;

        tracing::debug!(%filename, size = bytes.len(), "Stored PDF");
        Ok(StoredPdf {
            url: format!("{PDF_URL_PREFIX}{filename}"),
            filename,
        })
    }

    /// Removes the file behind a public PDF url. Failures are logged, not
    /// returned.
    pub async fn remove_url(&self, url: &str) {
        let Some(filename) = filename_from_url(url) else {
            tracing::warn!(url, "Refusing to remove PDF outside the upload directory");
            return;
        };

        match tokio::fs::remove_file(self.dir.join(filename)).await {
            Ok(()) => tracing::debug!(filename, "Removed PDF"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(filename, error = %e, "Failed to remove PDF"),
        }
    }
}

/// Extracts the bare filename from a public PDF url.
///
/// Returns `None` for urls outside [`PDF_URL_PREFIX`] or with path separators.
pub fn filename_from_url(url: &str) -> Option<&str> {
    let name = url.strip_prefix(PDF_URL_PREFIX)?;
    let valid = !name.is_empty() && !name.contains(['/', '\\']) && name != ".." && name != ".";
    valid.then_some(name)
}
