use axum::body::Bytes;
use axum::extract::multipart::{Field, Multipart, MultipartError};

use labtrack_core::study::{CreateStudyForm, StudyError};

/// A PDF held in memory until the request is validated.
#[derive(Debug, Clone)]
pub struct StagedPdf {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// Everything a study upload form carried.
#[derive(Debug, Default)]
pub struct StudyUpload {
    pub form: CreateStudyForm,
    pub pdf: Option<StagedPdf>,
}

fn upload_error(e: MultipartError) -> StudyError {
    StudyError::Upload(e.body_text())
}

fn is_pdf(field: &Field<'_>) -> bool {
    let by_type = field
        .content_type()
        .is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"));
    let by_name = field
        .file_name()
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"));
    by_type || by_name
}

/// Reads a multipart study form.
///
/// Text fields fill a [`CreateStudyForm`]. The `pdf` file field is checked
/// for a PDF content type or extension and for `max_bytes`, then kept in
/// memory; nothing touches the disk here. Any other file field is rejected.
pub async fn read_study_upload(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<StudyUpload, StudyError> {
    let mut upload = StudyUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == CreateStudyForm::PDF {
            let file_name = field.file_name().map(str::to_string);
            let pdf = is_pdf(&field);
            let bytes = field.bytes().await.map_err(upload_error)?;

            // Browsers send an empty part when no file was picked.
            if bytes.is_empty() && file_name.as_deref().unwrap_or_default().is_empty() {
                continue;
            }
            if !pdf {
                return Err(StudyError::Upload("Only PDF files are allowed".to_string()));
            }
            if bytes.len() > max_bytes {
                return Err(StudyError::Upload(format!(
                    "File too large (limit {max_bytes} bytes)"
                )));
            }

            upload.pdf = Some(StagedPdf { file_name, bytes });
        } else if field.file_name().is_some() {
            return Err(StudyError::Upload(format!("Unexpected file field '{name}'")));
        } else {
            let value = field.text().await.map_err(upload_error)?;
            if !upload.form.set_field(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
    }

    Ok(upload)
}
