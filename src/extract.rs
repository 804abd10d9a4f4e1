use axum::extract::FromRequest;
use axum::response::IntoResponse;

use crate::error::Error;

/// `axum::Json` with rejections routed through the crate error type, so a
/// missing or malformed body reports 400 `{"error": ...}` like every other
/// input failure instead of axum's default 422.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct Json<T>(pub T);

impl<T: serde::Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self.0).into_response()
    }
}
