//!
//! # Custom Error Handling
//!
//! This module defines `AppError`, the error type returned by every handler
//! and service. It implements `actix_web::error::ResponseError`, turning each
//! variant into an HTTP status with a JSON body of the form
//! `{"error": "<message>"}`.
//!
//! Lower layers have their own error types (`AuthError`, `RepositoryError`);
//! the `From` implementations here are where those kinds are mapped onto HTTP
//! semantics, so the `?` operator does the translation in handlers.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::error;
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::AuthError;
use crate::repository::RepositoryError;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed or is missing (HTTP 401).
    Unauthorized(String),
    /// Authenticated, but not allowed to do this (HTTP 403).
    Forbidden(String),
    /// Malformed or invalid request (HTTP 400).
    BadRequest(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// The request collides with existing data, e.g. a duplicate email (HTTP 409).
    Conflict(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Failure in the database layer (HTTP 500).
    DatabaseError(String),
    /// Input validation failed (HTTP 422 Unprocessable Entity).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
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
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Server-side details stay in the log.
            AppError::InternalServerError(msg) | AppError::DatabaseError(msg) => {
                error!("{}: {}", self.status_code(), msg);
                "Internal server error"
            }
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::ValidationError(msg) => msg.as_str(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// Maps the auth flow's failure kinds onto HTTP semantics.
impl From<AuthError> for AppError {
    fn from(error: AuthError) -> AppError {
        match error {
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::Unauthorized => AppError::Unauthorized(error.to_string()),
            AuthError::InactiveAccount | AuthError::Forbidden => {
                AppError::Forbidden(error.to_string())
            }
            AuthError::Internal(msg) => AppError::InternalServerError(msg),
            AuthError::Storage(msg) => AppError::DatabaseError(msg),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> AppError {
        match error {
            RepositoryError::Conflict(_) => AppError::Conflict("Resource already exists".into()),
            RepositoryError::Database(msg) => AppError::DatabaseError(msg),
        }
    }
}

/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}
