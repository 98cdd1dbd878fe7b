use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::ErrorResponse;

/// Router fallback for unmatched paths.
pub async fn not_found() -> Response {
    let status = StatusCode::NOT_FOUND;
    let body = ErrorResponse::new(status, "The requested resource was not found");
    (status, Json(body)).into_response()
}
