//! Domain-specific error types and error handling.

mod types;


pub use types::AuthError;

use ev_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// HTTP status the transport layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Validation { .. } => 400,
            DomainError::NotFound { .. } => 404,
            DomainError::Unauthorized => 401,
            DomainError::Internal { .. } => 500,
            DomainError::Auth(auth) => auth.status_code(),
        }
    }

    /// Stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Unauthorized => error_codes::UNAUTHORIZED,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(auth) => auth.error_code(),
        }
    }

    /// Whether the failure was caused by the caller rather than the system
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            // Internal details stay in the logs
            DomainError::Internal { .. } => {
                ErrorResponse::new(self.error_code(), "Internal server error")
            }
            _ => ErrorResponse::new(self.error_code(), self.to_string()),
        }
    }
}
