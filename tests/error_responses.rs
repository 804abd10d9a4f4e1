use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use careersync_backend::error::Error;
use serde_json::Value;

#[tokio::test]
async fn client_errors_map_to_expected_statuses() {
    let cases = [
        (Error::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
        (Error::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
        (Error::Forbidden("nope".into()), StatusCode::FORBIDDEN),
        (Error::NotFound("gone".into()), StatusCode::NOT_FOUND),
        (Error::Conflict("dup".into()), StatusCode::CONFLICT),
    ];

    for (err, expected) in cases {
        let response = err.into_response();
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
async fn error_body_is_json_with_error_field() {
    let response = Error::NotFound("No job with id 42".into()).into_response();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "No job with id 42");
}

#[tokio::test]
async fn database_errors_are_masked() {
    let err: Error = sqlx::Error::PoolTimedOut.into();
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "An unexpected error occurred");
}

#[tokio::test]
async fn row_not_found_becomes_404() {
    let err: Error = sqlx::Error::RowNotFound.into();
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}
