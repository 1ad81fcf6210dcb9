//! Study endpoints.

use std::path::Path;

use labtrack_core::study::{CreateStudyForm, StudyView, UpdateStatusRequest};
use reqwest::{multipart, Method};

use super::LabtrackClient;
use crate::error::{ClientError, Result};

impl LabtrackClient {
    /// Studies assigned to the authenticated biochemist.
    pub async fn list_my_studies(&self) -> Result<Vec<StudyView>> {
        let response = self
            .request(Method::GET, "/api/studies/biochemist/me")
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Every study (ADMIN only).
    pub async fn list_all_studies(&self) -> Result<Vec<StudyView>> {
        let response = self.request(Method::GET, "/api/studies/all").send().await?;
        self.handle_response(response).await
    }

    /// Studies of the authenticated patient.
    pub async fn list_patient_studies(&self) -> Result<Vec<StudyView>> {
        let response = self
            .request(Method::GET, "/api/studies/patient/me")
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get a study by id.
    pub async fn get_study(&self, id: i64) -> Result<StudyView> {
        let response = self
            .request(Method::GET, &format!("/api/studies/{id}"))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a study, optionally uploading a PDF with it.
    pub async fn create_study(
        &self,
        form: &CreateStudyForm,
        pdf: Option<&Path>,
    ) -> Result<StudyView> {
        let mut body = multipart::Form::new();
        for (name, value) in form.text_fields() {
            body = body.text(name, value);
        }
        if let Some(path) = pdf {
            body = body.part(CreateStudyForm::PDF, pdf_part(path).await?);
        }

        let response = self
            .request(Method::POST, "/api/studies")
            .multipart(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Move a study to the named status.
    pub async fn update_study_status(&self, id: i64, status_name: &str) -> Result<StudyView> {
        let response = self
            .request(Method::PATCH, &format!("/api/studies/{id}/status"))
            .json(&UpdateStatusRequest::new(status_name))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Attach or replace the PDF of a study.
    pub async fn attach_pdf(&self, id: i64, path: &Path) -> Result<StudyView> {
        let body = multipart::Form::new().part(CreateStudyForm::PDF, pdf_part(path).await?);
        let response = self
            .request(Method::PATCH, &format!("/api/studies/{id}"))
            .multipart(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a study. Returns the server's confirmation message.
    pub async fn delete_study(&self, id: i64) -> Result<String> {
        let response = self
            .request(Method::DELETE, &format!("/api/studies/{id}"))
            .send()
            .await?;
        self.handle_message(response).await
    }
}

async fn pdf_part(path: &Path) -> Result<multipart::Part> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ClientError::InvalidInput(format!("{} is not a file", path.display())))?;

    Ok(multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("application/pdf")?)
}
