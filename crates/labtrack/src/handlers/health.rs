//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Storage check: the status reference table is readable and seeded

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Storage readiness.
///
/// Returns 200 with the number of statuses, or 503 when the table cannot be
/// read or is empty.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Response {
    match state.statuses.list_statuses().await {
        Ok(statuses) if !statuses.is_empty() => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "statuses": statuses.len()
            })),
        )
            .into_response(),
        Ok(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "unavailable",
                "error": "status table is empty"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unavailable",
                    "error": e.to_string()
                })),
            )
                .into_response()
        }
    }
}
