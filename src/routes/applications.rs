use axum::{
    extract::{Extension, Path, State},
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    dto::application_dto::StatusUpdatePayload,
    error::{Error, Result},
    extract::Json,
    middleware::permissions::check_ownership,
    utils::jwt::TokenUser,
    AppState,
};

#[axum::debug_handler]
pub async fn my_applications(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
) -> Result<impl IntoResponse> {
    let applications = state
        .application_service
        .list_for_talent(user.user_id)
        .await?;
    Ok(Json(json!({ "applications": applications })))
}

#[axum::debug_handler]
pub async fn job_applications(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(job_id).await?;
    check_ownership(&user, job.created_by)?;

    let applications = state.application_service.list_for_job(job_id).await?;
    if applications.is_empty() {
        return Err(Error::NotFound("No job applications found".to_string()));
    }
    Ok(Json(json!({ "applications": applications })))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path((job_id, applicant_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<StatusUpdatePayload>,
) -> Result<impl IntoResponse> {
    // authorization runs against the job's owner, not the application
    let job = state.job_service.get_by_id(job_id).await?;
    check_ownership(&user, job.created_by)?;

    let application = state
        .application_service
        .update_status(job_id, applicant_id, payload.status)
        .await?;
    Ok(Json(json!({ "application": application })))
}

#[axum::debug_handler]
pub async fn withdraw(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .withdraw(id, user.user_id)
        .await?;
    Ok(Json(json!({ "application": application })))
}
