//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Registration input rejected before anything is written.
///
/// The messages are returned verbatim to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("First name and Last name are required!")]
    NameRequired,

    #[error("RoleId is required and must be 1 or 2!")]
    RoleInvalid,

    #[error("Email or Phone number is required!")]
    ContactRequired,

    #[error("Password is required!")]
    PasswordRequired,

    /// Carries the request field name, e.g. `batchNumber`
    #[error("{0} is required for Graduate!")]
    GraduateFieldRequired(&'static str),

    #[error("Department is required for Admin!")]
    DepartmentRequired,

    #[error("Invalid request body!")]
    InvalidBody,
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Email or phone number already registered
    #[error("User already exists!")]
    UserAlreadyExists,

    /// Unknown email and wrong password share this variant
    #[error("Wrong email or password!")]
    InvalidCredentials,

    /// No bearer token on a protected request
    #[error("Unauthorized")]
    MissingToken,

    /// Bearer token present but rejected (bad signature, expired, malformed)
    #[error("Forbidden")]
    InvalidToken(#[source] TokenError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordHashError),

    #[error("Token signing failed: {0}")]
    TokenIssue(#[source] TokenError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::UserAlreadyExists
            | AuthError::InvalidCredentials => ErrorKind::BadRequest,
            AuthError::MissingToken => ErrorKind::Unauthorized,
            AuthError::InvalidToken(_) => ErrorKind::Forbidden,
            AuthError::Password(_)
            | AuthError::TokenIssue(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Password(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::TokenIssue(e) => {
                tracing::error!(error = %e, "Token signing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken(reason) => {
                tracing::warn!(reason = %reason, "Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
