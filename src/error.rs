//!
//! # HTTP Error Handling
//!
//! This module defines `AppError`, the error type returned by request handlers
//! and middleware. Every lower-layer error (domain, auth flow, token, request
//! validation) converts into it with `?`, and it renders itself as the standard
//! `{success, message, error}` envelope with the matching status code.
//!
//! Internal failures never reach the client verbatim: database and other
//! server-side errors are logged and answered with a generic message.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;
use validator::ValidationErrors;

use crate::auth::TokenError;
use crate::domain::DomainError;
use crate::response::ApiResponse;
use crate::services::AuthError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Represents all errors a handler can answer with.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed or is missing (HTTP 401).
    Unauthorized(String),
    /// Malformed or semantically invalid request (HTTP 400).
    BadRequest(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Storage failure (HTTP 500). The detail is only logged.
    DatabaseError(String),
    /// Request body failed shape validation (HTTP 400).
    /// Carries the validator's field messages.
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl AppError {
    /// The machine-readable category placed in the envelope's `error` field.
    fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "unauthorized",
            AppError::BadRequest(_) => "bad_request",
            AppError::NotFound(_) => "not_found",
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => "internal_error",
            AppError::ValidationError(_) => "validation_error",
        }
    }
}

/// Converts `AppError` variants into enveloped `HttpResponse`s.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Unauthorized(msg) | AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                ApiResponse::failure(msg.as_str(), self.kind())
            }
            AppError::ValidationError(details) => {
                ApiResponse::failure("Validation failed", details.as_str())
            }
            AppError::InternalServerError(detail) | AppError::DatabaseError(detail) => {
                log::error!("{}: {}", self.kind(), detail);
                ApiResponse::failure(INTERNAL_MESSAGE, self.kind())
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Maps the storage taxonomy onto HTTP. Handlers that know which resource
/// was missing replace the generic `NotFound` message themselves.
impl From<DomainError> for AppError {
    fn from(error: DomainError) -> AppError {
        match error {
            DomainError::NotFound => AppError::NotFound("Resource not found".into()),
            DomainError::InvalidInput => AppError::BadRequest("Invalid input".into()),
            DomainError::DuplicateEntry => AppError::BadRequest("Resource already exists".into()),
            DomainError::DatabaseOperation => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> AppError {
        match error {
            AuthError::EmailAlreadyExists => AppError::BadRequest("Email already exists".into()),
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".into())
            }
            AuthError::UserNotFound => AppError::NotFound("User not found".into()),
            AuthError::Domain(e) => e.into(),
            AuthError::Token(e) => e.into(),
            AuthError::Password(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        match error {
            TokenError::InvalidToken => AppError::Unauthorized("Invalid token".into()),
            TokenError::ExpiredToken => AppError::Unauthorized("Token has expired".into()),
            TokenError::Signing(_) => AppError::InternalServerError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}
