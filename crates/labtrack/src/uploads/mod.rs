//! PDF uploads: multipart parsing and on-disk storage.

mod multipart;
mod store;

pub use multipart::{read_study_upload, StagedPdf, StudyUpload};
pub use store::{PdfStore, StoredPdf};
