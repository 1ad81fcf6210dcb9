//! Study handlers.
//!
//! Role gates run as extractors before any handler logic; the authenticated
//! user is then passed explicitly to [`StudyService`](crate::services::StudyService).

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::JsonRejection,
        Path, State,
    },
    http::StatusCode,
    Json,
};
use labtrack_auth::{CurrentUser, RequireAdmin, RequireBiochemist};
use labtrack_core::api::ApiResponse;
use labtrack_core::study::{parse_study_id, StudyError, StudyView, UpdateStatusRequest};

use crate::handlers::error::ApiError;
use crate::state::AppState;
use crate::uploads::{read_study_upload, StudyUpload};

type StudyResponse = Json<ApiResponse<StudyView>>;
type StudyListResponse = Json<ApiResponse<Vec<StudyView>>>;

async fn read_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StudyUpload, StudyError> {
    let multipart = multipart.map_err(|e| StudyError::Upload(e.body_text()))?;
    read_study_upload(multipart, state.upload_max_bytes).await
}

/// POST /api/studies - Create a study from a multipart form.
#[axum::debug_handler]
pub async fn create_study(
    State(state): State<AppState>,
    RequireBiochemist(user): RequireBiochemist,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, StudyResponse), ApiError> {
    let upload = read_upload(&state, multipart).await?;
    let study = state
        .studies
        .create_study(&user, &upload.form, upload.pdf)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(study, "Study created successfully")),
    ))
}

/// GET /api/studies/biochemist/me - Studies assigned to the caller.
#[axum::debug_handler]
pub async fn list_biochemist_studies(
    State(state): State<AppState>,
    RequireBiochemist(user): RequireBiochemist,
) -> Result<StudyListResponse, ApiError> {
    let studies = state.studies.list_for_biochemist(&user).await?;
    Ok(Json(ApiResponse::ok(studies, "Studies retrieved")))
}

/// GET /api/studies/all - Every study (administrators only).
#[axum::debug_handler]
pub async fn list_all_studies(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> Result<StudyListResponse, ApiError> {
    let studies = state.studies.list_all().await?;
    Ok(Json(ApiResponse::ok(studies, "Studies retrieved")))
}

/// GET /api/studies/patient/me - Studies owned by the caller.
#[axum::debug_handler]
pub async fn list_patient_studies(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StudyListResponse, ApiError> {
    let studies = state.studies.list_for_patient(&user).await?;
    Ok(Json(ApiResponse::ok(studies, "Studies retrieved")))
}

/// GET /api/studies/{id}
#[axum::debug_handler]
pub async fn get_study(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<StudyResponse, ApiError> {
    let id = parse_study_id(&id)?;
    let study = state.studies.get_study(&user, id).await?;
    Ok(Json(ApiResponse::ok(study, "Study retrieved")))
}

/// PATCH /api/studies/{id}/status - Move a study to another status.
#[axum::debug_handler]
pub async fn update_study_status(
    State(state): State<AppState>,
    RequireBiochemist(user): RequireBiochemist,
    Path(id): Path<String>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<StudyResponse, ApiError> {
    let id = parse_study_id(&id)?;
    let Json(request) = body.map_err(|e| StudyError::InvalidBody(e.body_text()))?;

    let study = state.studies.update_status(&user, id, &request).await?;
    Ok(Json(ApiResponse::ok(study, "Study status updated")))
}

/// PATCH /api/studies/{id} - Attach or replace the study PDF.
#[axum::debug_handler]
pub async fn attach_study_pdf(
    State(state): State<AppState>,
    RequireBiochemist(user): RequireBiochemist,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StudyResponse, ApiError> {
    let id = parse_study_id(&id)?;
    let upload = read_upload(&state, multipart).await?;

    let study = state.studies.attach_pdf(&user, id, upload.pdf).await?;
    Ok(Json(ApiResponse::ok(study, "Study PDF updated")))
}

/// DELETE /api/studies/{id}
#[axum::debug_handler]
pub async fn delete_study(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_study_id(&id)?;
    state.studies.delete_study(&user, id).await?;
    Ok(Json(ApiResponse::done("Study deleted successfully")))
}
