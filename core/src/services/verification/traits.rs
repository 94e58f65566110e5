//! Traits for email delivery and code generation

use async_trait::async_trait;

use crate::domain::entities::verification_code::VerificationCode;

/// Trait for email service integration
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a verification code to an email address, returning the provider message id
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String>;
    /// Check if the email address format is valid
    fn is_valid_email(&self, email: &str) -> bool;
}

/// Source of verification code values
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Six random digits from the OS CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        VerificationCode::generate_code()
    }
}
