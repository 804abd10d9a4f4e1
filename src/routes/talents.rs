use axum::{
    extract::{Extension, Path, State},
    http::header,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::Result, services::talent_service::rows_to_csv, utils::jwt::TokenUser, AppState,
};

#[axum::debug_handler]
pub async fn list_talents(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
) -> Result<impl IntoResponse> {
    let applications = state.talent_service.list_applicants(user.user_id).await?;
    if applications.is_empty() {
        return Ok(Json(json!({ "msg": "No Applicants found" })).into_response());
    }
    Ok(Json(json!({ "applications": applications })).into_response())
}

#[axum::debug_handler]
pub async fn get_talent(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path(talent_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applications = state
        .talent_service
        .talent_applications(user.user_id, talent_id)
        .await?;
    Ok(Json(json!({ "applications": applications })))
}

/// CSV attachment of every application across the employer's jobs. An empty
/// result set yields an informational JSON body instead of a CSV document.
#[axum::debug_handler]
pub async fn export_applications(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
) -> Result<impl IntoResponse> {
    let rows = state.talent_service.export_rows(user.user_id).await?;
    if rows.is_empty() {
        return Ok(Json(json!({ "msg": "No applications found to export" })).into_response());
    }

    let csv = rows_to_csv(&rows)?;
    let filename = format!("applications_{}.csv", chrono::Utc::now().format("%Y%m%d"));
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
