use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found with id: {0}")]
    NotFound(i64),

    /// `field` is the capitalised field name, e.g. "Username"
    #[error("{field} already exists: {value}")]
    AlreadyExists { field: &'static str, value: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserError {
    pub fn username_taken(value: impl Into<String>) -> Self {
        Self::AlreadyExists {
            field: "Username",
            value: value.into(),
        }
    }

    pub fn email_taken(value: impl Into<String>) -> Self {
        Self::AlreadyExists {
            field: "Email",
            value: value.into(),
        }
    }
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound(err.to_string()),
            UserError::AlreadyExists { .. } => AppError::Conflict(err.to_string()),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
