//! Health endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::LabtrackClient;
use crate::error::{ClientError, Result};

/// Body of `/healthz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub statuses: Option<usize>,
    #[serde(default)]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

impl LabtrackClient {
    /// Liveness probe. True when the process answers.
    pub async fn livez(&self) -> Result<bool> {
        let response = self.request(Method::GET, "/livez").send().await?;
        Ok(response.status().is_success())
    }

    /// Readiness probe. A 503 still carries a report.
    pub async fn healthz(&self) -> Result<HealthReport> {
        let response = self.request(Method::GET, "/healthz").send().await?;
        let status = response.status();
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|_| ClientError::ServerError {
            status: status.as_u16(),
            message: body,
        })
    }
}
