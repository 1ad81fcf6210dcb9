//! Patient lookup.

use labtrack_core::study::PatientLookup;
use reqwest::Method;

use super::LabtrackClient;
use crate::error::Result;

impl LabtrackClient {
    /// Find a patient by dni (BIOCHEMIST only).
    pub async fn find_patient(&self, dni: &str) -> Result<PatientLookup> {
        let response = self
            .request(Method::GET, &format!("/api/studies/patient/{}", dni.trim()))
            .send()
            .await?;
        self.handle_response(response).await
    }
}
