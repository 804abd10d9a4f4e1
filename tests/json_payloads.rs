use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::routing::post;
use axum::Router;
use careersync_backend::dto::auth_dto::LoginPayload;
use careersync_backend::extract::Json;
use serde_json::Value;
use tower::ServiceExt;

async fn login_stub(Json(_payload): Json<LoginPayload>) -> StatusCode {
    StatusCode::OK
}

fn app() -> Router {
    Router::new().route("/login", post(login_stub))
}

fn json_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn missing_field_reports_400_with_error_body() {
    let response = app()
        .oneshot(json_request(r#"{"email":"a@b.com"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_json_reports_400() {
    let response = app().oneshot(json_request("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn well_formed_payload_passes_through() {
    let response = app()
        .oneshot(json_request(r#"{"email":"a@b.com","password":"pw"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
