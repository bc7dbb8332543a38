//!
//! # Custom Error Handling
//!
//! Defines the `AppError` type used throughout the application and its
//! conversion into HTTP responses via `actix_web::error::ResponseError`.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError` let handlers
//! bubble failures with the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// All error conditions a request can end in.
#[derive(Debug)]
pub enum AppError {
    /// The caller has no usable session where one is required (HTTP 401).
    Unauthorized(String),
    /// Malformed or invalid request (HTTP 400).
    BadRequest(String),
    /// The requested task or record does not exist — or belongs to another
    /// user, which is answered identically (HTTP 404).
    NotFound(String),
    /// A uniqueness constraint was violated, e.g. the global task-text
    /// uniqueness rule (HTTP 409).
    Conflict(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Store-level failure; fatal for the current request, never retried
    /// (HTTP 500).
    DatabaseError(String),
    /// Typed form payload failed validation (HTTP 422).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "error": msg
            })),
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            // Database errors are presented as generic internal server errors.
            AppError::DatabaseError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
        }
    }
}

/// Maps `sqlx::Error` onto the taxonomy: missing rows become `NotFound`,
/// uniqueness violations become `Conflict`, everything else is a fatal
/// `DatabaseError` for the current request.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(e) if e.is_unique_violation() => {
                AppError::Conflict("A record with the same value already exists".into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::Unauthorized("No session".into());
        let response = error.error_response();
        assert_eq!(response.status(), 401);

        let error = AppError::BadRequest("Invalid input".into());
        let response = error.error_response();
        assert_eq!(response.status(), 400);

        let error = AppError::NotFound("Task not found".into());
        let response = error.error_response();
        assert_eq!(response.status(), 404);

        let error = AppError::Conflict("Task already exists".into());
        let response = error.error_response();
        assert_eq!(response.status(), 409);

        let error = AppError::InternalServerError("Server error".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);

        let error = AppError::ValidationError("Bad field".into());
        let response = error.error_response();
        assert_eq!(response.status(), 422);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error: AppError = sqlx::Error::RowNotFound.into();
        match error {
            AppError::NotFound(_) => {}
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }
}
