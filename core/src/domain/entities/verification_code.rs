//! Verification code entity for email ownership checks.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AuthError;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (15 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// One-time code proving control of an email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the verification code
    pub id: Uuid,

    /// User the code was issued to
    pub user_id: Uuid,

    /// Email address the code was sent to
    pub email: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been consumed
    pub is_used: bool,
}

impl VerificationCode {
    /// Creates a new verification code with the default expiration
    pub fn new(user_id: Uuid, email: String) -> Self {
        Self::new_with_expiration(user_id, email, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new verification code with a custom expiration time
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner of the code
    /// * `email` - Address the code will be delivered to
    /// * `expiration_minutes` - Number of minutes until the code expires
    pub fn new_with_expiration(user_id: Uuid, email: String, expiration_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            email,
            code: Self::generate_code(),
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            is_used: false,
        }
    }

    /// Generates a random 6-digit code using the OS CSPRNG
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    /// Checks if the verification code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// A code is outstanding while it is neither expired nor consumed
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_used
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, input_code: &str) -> bool {
        if self.code.len() != input_code.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), input_code.as_bytes())
    }

    /// Checks a submission for `email` without consuming the code.
    ///
    /// A mismatch leaves the code outstanding until it expires.
    pub fn check(&self, email: &str, input_code: &str) -> Result<(), AuthError> {
        if self.is_used {
            return Err(AuthError::InvalidVerificationCode);
        }
        if !self.matches(input_code) {
            return Err(AuthError::InvalidVerificationCode);
        }
        if self.is_expired() {
            return Err(AuthError::VerificationCodeExpired);
        }
        if self.email != email {
            return Err(AuthError::InvalidVerificationCode);
        }
        Ok(())
    }

    /// Gets the time remaining until expiration, zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }

    /// Marks the verification code as consumed
    pub fn mark_as_used(&mut self) {
        self.is_used = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "ada@example.com";

    fn code_for_test() -> VerificationCode {
        VerificationCode::new(Uuid::new_v4(), EMAIL.to_string())
    }

    #[test]
    fn test_new_verification_code() {
        let user_id = Uuid::new_v4();
        let code = VerificationCode::new(user_id, EMAIL.to_string());

        assert_eq!(code.user_id, user_id);
        assert_eq!(code.email, EMAIL);
        assert_eq!(code.code.len(), CODE_LENGTH);
        assert!(!code.is_used);
        assert!(!code.is_expired());
        assert!(code.is_valid());
        assert_eq!(
            code.expires_at - code.created_at,
            Duration::minutes(DEFAULT_EXPIRATION_MINUTES)
        );
    }

    #[test]
    fn test_generate_code_format() {
        for _ in 0..100 {
            let code = VerificationCode::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: std::collections::HashSet<String> =
            (0..100).map(|_| VerificationCode::generate_code()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_check_success() {
        let code = code_for_test();
        let value = code.code.clone();
        assert!(code.check(EMAIL, &value).is_ok());
    }

    #[test]
    fn test_check_mismatch_keeps_code_outstanding() {
        let mut code = code_for_test();
        code.code = "482913".to_string();

        let result = code.check(EMAIL, "000000");
        assert!(matches!(result, Err(AuthError::InvalidVerificationCode)));
        assert!(code.is_valid());
    }

    #[test]
    fn test_check_wrong_length() {
        let mut code = code_for_test();
        code.code = "482913".to_string();
        assert!(!code.matches("48291"));
        assert!(!code.matches("4829130"));
    }

    #[test]
    fn test_check_used_code() {
        let mut code = code_for_test();
        let value = code.code.clone();
        code.mark_as_used();

        assert!(!code.is_valid());
        assert!(matches!(
            code.check(EMAIL, &value),
            Err(AuthError::InvalidVerificationCode)
        ));
    }

    #[test]
    fn test_check_expired_code() {
        let mut code = code_for_test();
        let value = code.code.clone();
        code.expires_at = Utc::now() - Duration::seconds(1);

        assert!(code.is_expired());
        assert!(!code.is_valid());
        assert_eq!(code.time_until_expiration(), Duration::zero());
        assert!(matches!(
            code.check(EMAIL, &value),
            Err(AuthError::VerificationCodeExpired)
        ));
    }

    #[test]
    fn test_check_email_changed() {
        let code = code_for_test();
        let value = code.code.clone();
        assert!(matches!(
            code.check("other@example.com", &value),
            Err(AuthError::InvalidVerificationCode)
        ));
    }

    #[test]
    fn test_custom_expiration() {
        let code = VerificationCode::new_with_expiration(Uuid::new_v4(), EMAIL.to_string(), 5);
        assert_eq!(code.expires_at, code.created_at + Duration::minutes(5));
        assert!(code.time_until_expiration() <= Duration::minutes(5));
    }

    #[test]
    fn test_serialization() {
        let code = code_for_test();
        let json = serde_json::to_string(&code).unwrap();
        let deserialized: VerificationCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, deserialized);
    }
}
