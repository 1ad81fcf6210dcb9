//! HTTP client for the labtrack API.

pub mod health;
pub mod patients;
pub mod studies;

use labtrack_core::api::ApiResponse;

use crate::error::{ClientError, Result};

/// HTTP client for the labtrack API.
#[derive(Debug, Clone)]
pub struct LabtrackClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl LabtrackClient {
    /// Create a new client with the given base URL and session token.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Create from environment (`LABTRACK_URL`, `LABTRACK_TOKEN`).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("LABTRACK_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        Self::new(base_url, std::env::var("LABTRACK_TOKEN").ok())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request, with the bearer token when one is set.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Unwrap the `data` of a successful envelope, or turn the failure
    /// envelope into a [`ClientError`].
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let envelope: ApiResponse<T> = self.read_envelope(response).await?;
        envelope
            .into_data()
            .ok_or_else(|| ClientError::InvalidResponse("response carried no data".to_string()))
    }

    /// Like [`handle_response`](Self::handle_response) for endpoints that
    /// only answer with a message.
    async fn handle_message(&self, response: reqwest::Response) -> Result<String> {
        let envelope: ApiResponse<serde_json::Value> = self.read_envelope(response).await?;
        Ok(envelope.message.unwrap_or_default())
    }

    async fn read_envelope<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(ClientError::from);
        }

        Err(error_from_body(status.as_u16(), &body))
    }
}

/// Builds the error for a failed response, preferring the envelope's message.
pub fn error_from_body(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .ok()
        .map(|envelope| {
            let mut message = envelope.message.unwrap_or_default();
            if let Some(detail) = envelope.error {
                message = format!("{message} ({detail})");
            }
            for field in envelope.errors.unwrap_or_default() {
                message.push_str(&format!("\n  {}: {}", field.field, field.message));
            }
            message
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());

    match status {
        401 => ClientError::Unauthorized(message),
        403 => ClientError::Forbidden(message),
        404 => ClientError::NotFound { message },
        _ => ClientError::ServerError { status, message },
    }
}
