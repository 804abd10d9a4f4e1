use axum::{
    extract::{Extension, Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::get_config,
    dto::application_dto::ApplyFields,
    dto::job_dto::{CreateJobPayload, JobListQuery, JobListResponse, UpdateJobPayload},
    error::{Error, Result},
    extract::Json,
    middleware::permissions::check_ownership,
    utils::jwt::TokenUser,
    AppState,
};

#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.create(payload, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let list = state.job_service.list(user.user_id, query).await?;
    Ok(Json(JobListResponse {
        jobs: list.jobs,
        total_jobs: list.total,
        num_of_pages: list.total_pages,
        page: list.page,
    }))
}

#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    check_ownership(&user, job.created_by)?;
    let applicants = state.job_service.applicants(id).await?;
    Ok(Json(json!({ "job": job, "applicants": applicants })))
}

#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.get_by_id(id).await?;
    check_ownership(&user, job.created_by)?;
    let job = state.job_service.update(id, payload).await?;
    Ok(Json(json!({ "job": job })))
}

#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    check_ownership(&user, job.created_by)?;
    state.job_service.delete(id).await?;
    Ok(Json(json!({ "msg": "Success! Job removed" })))
}

#[axum::debug_handler]
pub async fn close_job(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(job_id).await?;
    check_ownership(&user, job.created_by)?;
    let job = state.job_service.close(job_id).await?;
    Ok(Json(json!({ "job": job })))
}

/// Renames the lookup miss for this route; anything else (pool exhaustion,
/// real database failures) keeps its own classification.
fn missing_job_error(id: Uuid, err: Error) -> Error {
    match err {
        Error::NotFound(_) => Error::NotFound(format!("No job with id {}", id)),
        other => other,
    }
}

struct CvUpload {
    bytes: bytes::Bytes,
    extension: String,
}

async fn parse_apply_form(mut multipart: Multipart) -> Result<(Option<CvUpload>, ApplyFields)> {
    let mut cv = None;
    let mut fields = ApplyFields::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "cv" => {
                let extension = field
                    .file_name()
                    .and_then(|f| std::path::Path::new(f).extension())
                    .and_then(|e| e.to_str())
                    .map(|e| format!(".{}", e))
                    .unwrap_or_default();
                let bytes = field.bytes().await?;
                cv = Some(CvUpload { bytes, extension });
            }
            "coverLetter" => fields.cover_letter = Some(field.text().await?),
            "portfolio" => fields.portfolio = Some(field.text().await?),
            "linkedInProfile" => fields.linkedin_profile = Some(field.text().await?),
            "skills" => {
                fields.skills = field
                    .text()
                    .await?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            "experienceLevel" => {
                let raw = field.text().await?;
                let level = raw.trim().parse().map_err(|_| {
                    Error::BadRequest(format!("Invalid experience level: {}", raw))
                })?;
                fields.experience_level = Some(level);
            }
            "availability" => fields.availability = Some(field.text().await?),
            "locationPreferences" => fields.location_preferences = Some(field.text().await?),
            "references" => {
                fields.referees = field
                    .text()
                    .await?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            _ => {}
        }
    }

    Ok((cv, fields))
}

#[axum::debug_handler]
pub async fn apply_for_job(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let (cv, fields) = parse_apply_form(multipart).await?;
    let cv = cv.ok_or_else(|| Error::BadRequest("Please upload your CV".to_string()))?;

    let job = state
        .job_service
        .get_by_id(id)
        .await
        .map_err(|err| missing_job_error(id, err))?;

    let dir = std::path::Path::new(&get_config().uploads_dir).join("cvs");
    tokio::fs::create_dir_all(&dir).await?;
    let file_name = format!("{}{}", Uuid::new_v4(), cv.extension);
    let cv_path = dir.join(&file_name);
    tokio::fs::write(&cv_path, &cv.bytes).await?;
    let stored_path = cv_path.to_string_lossy().into_owned();

    let application = state
        .application_service
        .apply(&job, user.user_id, &stored_path, fields)
        .await;

    match application {
        Ok(application) => Ok((
            StatusCode::CREATED,
            Json(json!({ "application": application })),
        )),
        Err(err) => {
            // the CV was written before the business checks; don't leak it
            let _ = tokio::fs::remove_file(&cv_path).await;
            Err(err)
        }
    }
}

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_miss_gets_the_job_id_message() {
        let id = Uuid::new_v4();
        let err = missing_job_error(id, Error::NotFound("Resource not found".to_string()));
        match err {
            Error::NotFound(msg) => assert_eq!(msg, format!("No job with id {}", id)),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn database_failures_are_not_rewritten_as_missing_job() {
        let err = missing_job_error(
            Uuid::new_v4(),
            Error::Database(sqlx::Error::PoolTimedOut),
        );
        assert!(matches!(err, Error::Database(_)));
    }
}
