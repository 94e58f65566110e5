//! Authentication error types for the verification and session flows

use ev_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Verification code expired")]
    VerificationCodeExpired,

    #[error("Failed to deliver verification email: {message}")]
    EmailDeliveryFailure { message: String },

    #[error("Session expired")]
    SessionExpired,

    #[error("User not found")]
    UserNotFound,
}

impl AuthError {
    /// HTTP status for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::InvalidVerificationCode | AuthError::VerificationCodeExpired => 400,
            AuthError::EmailDeliveryFailure { .. } => 502,
            AuthError::SessionExpired => 401,
            AuthError::UserNotFound => 404,
        }
    }

    /// Stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidVerificationCode => error_codes::VERIFICATION_CODE_INVALID,
            AuthError::VerificationCodeExpired => error_codes::VERIFICATION_CODE_EXPIRED,
            AuthError::EmailDeliveryFailure { .. } => error_codes::EMAIL_DELIVERY_FAILED,
            AuthError::SessionExpired => error_codes::SESSION_EXPIRED,
            AuthError::UserNotFound => error_codes::NOT_FOUND,
        }
    }
}

/// Convert AuthError to ErrorResponse
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string())
    }
}
