//! Error mapping to the message envelope.
//!
//! Caller-input faults surface their message; internal faults are logged in
//! full and answered with an opaque envelope.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use bookstack_core::error::{DomainError, RepoError};
use bookstack_core::ports::AuthError;
use bookstack_shared::MessageResponse;

/// Application-level error type for handler results.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::Conflict(msg) => MessageResponse::new(msg.clone()),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                MessageResponse::new("internal server error")
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UsernameTaken | DomainError::EmailTaken | DomainError::PhoneTaken => {
                AppError::Conflict(err.to_string())
            }
            DomainError::UserNotFound | DomainError::BookNotFound => {
                AppError::NotFound(err.to_string())
            }
            DomainError::PermissionDenied => AppError::Forbidden(err.to_string()),
            DomainError::Repo(RepoError::Constraint(msg)) => AppError::Conflict(msg),
            DomainError::Repo(repo) => AppError::Internal(repo.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Hashing(detail) | AuthError::Signing(detail) => AppError::Internal(detail),
            caller_fault => AppError::Unauthorized(caller_fault.to_string()),
        }
    }
}

/// Shape JSON body parse failures into the message envelope.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let response = AppError::BadRequest(err.to_string()).error_response();
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Shape path parameter parse failures (e.g. a non-numeric book id) into
/// the message envelope as a 400.
pub fn path_error_handler(
    err: actix_web::error::PathError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let response = AppError::BadRequest(err.to_string()).error_response();
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
