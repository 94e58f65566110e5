//! Types for verification service results

use crate::domain::entities::verification_code::VerificationCode;

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// The verification code entity that was stored and sent
    pub verification_code: VerificationCode,
    /// The message ID from the email provider
    pub message_id: String,
}
