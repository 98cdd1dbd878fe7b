pub mod handlers;
pub mod responses;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Message sent for every 5xx; the cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Error body for every non-validation failure.
///
/// `error` is the canonical reason phrase of the status code.
///
/// ```json
/// { "error": "Conflict", "message": "Username already exists: alice" }
/// ```
#[derive(Debug, Serialize, serde::Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Status category, e.g. "Not Found"
    pub error: String,
    /// Human-readable detail
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.into(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own error enums into this type; it is the
/// only place where errors become status codes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(JsonRejection::MissingJsonContentType(e)) => e.status(),
            AppError::JsonExtractorRejection(_) => StatusCode::BAD_REQUEST,
            AppError::QueryExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::ValidationError(errors) => {
                tracing::info!(errors = ?errors, "Validation failed");
                return (status, Json(field_error_map(&errors))).into_response();
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error = %e, "Rejected JSON body");
                e.body_text()
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::warn!(error = %e, "Rejected query string");
                e.body_text()
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                msg
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                msg
            }
            AppError::Conflict(msg) => {
                tracing::info!("Conflict: {}", msg);
                msg
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(cause = %msg, "Internal server error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorResponse::new(status, message))).into_response()
    }
}

/// Flatten validator output to `{ "field": "first message" }`.
///
/// Nested struct errors are keyed by their dotted path.
pub fn field_error_map(errors: &ValidationErrors) -> Map<String, Value> {
    let mut map = Map::new();
    collect_field_errors(errors, None, &mut map);
    map
}

fn collect_field_errors(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Map<String, Value>) {
    for (field, kind) in errors.errors() {
        let key = match prefix {
            Some(p) => format!("{}.{}", p, field),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(first) = list.first() {
                    let message = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", first.code));
                    out.insert(key, Value::String(message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(nested, Some(&key), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(nested, Some(&format!("{}[{}]", key, index)), out);
                }
            }
        }
    }
}
