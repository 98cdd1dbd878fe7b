//! OpenAPI response components matching the bodies [`super::AppError`] produces.

use super::ErrorResponse;
use std::collections::HashMap;
use utoipa::{ToResponse, ToSchema};

/// Flat `field -> message` map returned when request validation fails
#[derive(ToSchema)]
#[schema(example = json!({
    "username": "Username must be at least 3 characters",
    "email": "Email should be valid"
}))]
pub struct FieldErrors(pub HashMap<String, String>);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "username": "Username must be at least 3 characters",
        "password": "Password must be at least 6 characters"
    })
)]
pub struct ValidationErrorResponse(pub FieldErrors);

#[derive(ToResponse)]
#[response(
    description = "Bad Request",
    content_type = "application/json",
    example = json!({
        "error": "Bad Request",
        "message": "Invalid id: abc"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "error": "Not Found",
        "message": "User not found with id: 42"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "error": "Conflict",
        "message": "Username already exists: alice"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "error": "Internal Server Error",
        "message": "An unexpected error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
