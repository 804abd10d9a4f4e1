use axum::{
    extract::{Extension, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use validator::Validate;

use crate::{
    dto::auth_dto::{
        LoginPayload, RegisterPayload, ResendVerificationPayload, UpdatePasswordPayload,
        UpdateUserPayload, VerifyEmailQuery,
    },
    error::Result,
    extract::Json,
    utils::jwt::{attach_auth_cookies, clear_auth_cookies, TokenUser},
    AppState,
};

fn client_metadata(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    (ip, user_agent)
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, verification_token) = state.auth_service.register(payload).await?;
    state
        .mail_service
        .send_verification_email(&user.name, &user.email, &verification_token)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "msg": "Success! Please check your email to verify your account"
        })),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (ip, user_agent) = client_metadata(&headers);
    let (token_user, refresh_token) = state
        .auth_service
        .login(&payload.email, &payload.password, ip, user_agent)
        .await?;
    let jar = attach_auth_cookies(jar, &token_user, Some(&refresh_token))?;

    Ok((jar, Json(json!({ "tokenUser": token_user }))))
}

#[axum::debug_handler]
pub async fn logout(jar: CookieJar) -> Result<impl IntoResponse> {
    let jar = clear_auth_cookies(jar);
    Ok((jar, Json(json!({ "msg": "user logged out!" }))))
}

#[axum::debug_handler]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<impl IntoResponse> {
    state
        .auth_service
        .verify_email(&query.email, &query.verification_token)
        .await?;
    Ok(Json(json!({ "msg": "Email Verified" })))
}

#[axum::debug_handler]
pub async fn resend_verification(
    State(state): State<AppState>,
    Json(payload): Json<ResendVerificationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, verification_token) = state.auth_service.resend_verification(&payload.email).await?;
    state
        .mail_service
        .send_verification_email(&user.name, &user.email, &verification_token)
        .await;

    Ok(Json(json!({
        "msg": "Verification email resent. Please check your inbox."
    })))
}

#[axum::debug_handler]
pub async fn show_current_user(Extension(user): Extension<TokenUser>) -> Result<impl IntoResponse> {
    Ok(Json(json!({ "user": user })))
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    jar: CookieJar,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let updated = state.auth_service.update_user(user.user_id, payload).await?;
    let token_user = TokenUser::from(&updated);

    // identity changed, reissue session cookies with the new projection
    let jar = attach_auth_cookies(jar, &token_user, None)?;

    Ok((jar, Json(json!({ "user": token_user }))))
}

#[axum::debug_handler]
pub async fn update_user_password(
    State(state): State<AppState>,
    Extension(user): Extension<TokenUser>,
    Json(payload): Json<UpdatePasswordPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state
        .auth_service
        .update_password(user.user_id, payload)
        .await?;
    Ok(Json(json!({ "msg": "Success! Password Updated." })))
}
