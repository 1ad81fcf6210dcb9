use axum::{
    extract::{Path, State},
    Json,
};
use labtrack_auth::RequireBiochemist;
use labtrack_core::api::ApiResponse;
use labtrack_core::study::PatientLookup;

use crate::handlers::error::ApiError;
use crate::state::AppState;

/// GET /api/studies/patient/{dni} - Find a patient by document number.
#[axum::debug_handler]
pub async fn find_patient(
    State(state): State<AppState>,
    RequireBiochemist(_user): RequireBiochemist,
    Path(dni): Path<String>,
) -> Result<Json<ApiResponse<PatientLookup>>, ApiError> {
    let patient = state.studies.find_patient(&dni).await?;
    Ok(Json(ApiResponse::ok(patient, "Patient found")))
}
