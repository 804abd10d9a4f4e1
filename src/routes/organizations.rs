use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::organization_dto::{CreateOrganizationPayload, UpdateOrganizationPayload},
    error::Result,
    extract::Json,
    middleware::permissions::check_ownership,
    utils::jwt::TokenUser,
    AppState,
};

#[axum::debug_handler]
pub async fn create_organization(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Json(payload): Json<CreateOrganizationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let organization = state
        .organization_service
        .create(payload, user.user_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "msg": "Organization created successfully",
            "organization": organization
        })),
    ))
}

#[axum::debug_handler]
pub async fn my_organizations(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
) -> Result<impl IntoResponse> {
    let organizations = state
        .organization_service
        .list_for_owner(user.user_id)
        .await?;
    Ok(Json(json!({ "organizations": organizations })))
}

#[axum::debug_handler]
pub async fn update_organization(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrganizationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let organization = state.organization_service.get_by_id(id).await?;
    check_ownership(&user, organization.created_by)?;
    let organization = state.organization_service.update(id, payload).await?;
    Ok(Json(json!({ "organization": organization })))
}

#[axum::debug_handler]
pub async fn delete_organization(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let organization = state.organization_service.get_by_id(id).await?;
    check_ownership(&user, organization.created_by)?;
    state.organization_service.delete(id).await?;
    Ok(Json(json!({ "msg": "Organization removed" })))
}

#[axum::debug_handler]
pub async fn public_organizations(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let organizations = state.organization_service.list_public().await?;
    Ok(Json(json!({ "organizations": organizations })))
}

#[axum::debug_handler]
pub async fn public_organization(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let organization = state.organization_service.get_by_id(id).await?;
    Ok(Json(json!({ "organization": organization })))
}

#[axum::debug_handler]
pub async fn public_follower_count(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let count = state.organization_service.follower_count(id).await?;
    Ok(Json(json!({ "count": count })))
}

#[axum::debug_handler]
pub async fn follow_organization(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.organization_service.follow(id, user.user_id).await?;
    Ok(Json(json!({ "msg": "Now following organization" })))
}

#[axum::debug_handler]
pub async fn organization_followers(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let organization = state.organization_service.get_by_id(id).await?;
    check_ownership(&user, organization.created_by)?;
    let followers = state.organization_service.followers(id).await?;
    Ok(Json(json!({ "followers": followers })))
}

#[axum::debug_handler]
pub async fn is_following(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let following = state
        .organization_service
        .is_following(id, user.user_id)
        .await?;
    Ok(Json(json!({ "isFollowing": following })))
}
