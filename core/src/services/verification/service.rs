//! Main verification service implementation

use std::sync::Arc;

use ev_shared::validation::mask_email;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::VerificationCodeRepository;

use super::config::VerificationServiceConfig;
use super::traits::{CodeGenerator, EmailServiceTrait, RandomCodeGenerator};
use super::types::IssuedCode;

/// Verification service for issuing and checking email verification codes
pub struct VerificationService<C: VerificationCodeRepository, E: EmailServiceTrait> {
    /// Store holding each user's outstanding code
    code_repository: Arc<C>,
    /// Email service for delivering codes
    email_service: Arc<E>,
    /// Source of code values
    code_generator: Arc<dyn CodeGenerator>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<C: VerificationCodeRepository, E: EmailServiceTrait> VerificationService<C, E> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `code_repository` - Verification code store
    /// * `email_service` - Email delivery implementation
    /// * `config` - Service configuration
    pub fn new(
        code_repository: Arc<C>,
        email_service: Arc<E>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            code_repository,
            email_service,
            code_generator: Arc::new(RandomCodeGenerator),
            config,
        }
    }

    /// Replace the code source
    pub fn with_code_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.code_generator = generator;
        self
    }

    /// Issue a verification code for `user_id` and deliver it to `email`
    ///
    /// This method:
    /// 1. Validates the email format
    /// 2. Generates a new code and stores it, superseding any prior one
    /// 3. Sends the code by email
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedCode)` - Stored code and provider message id
    /// * `Err(DomainError::Auth(AuthError::EmailDeliveryFailure))` - The provider
    ///   rejected the message; the stored code stays outstanding
    /// * `Err(DomainError)` - Validation or store failure
    pub async fn generate_code(&self, user_id: Uuid, email: &str) -> DomainResult<IssuedCode> {
        if !self.email_service.is_valid_email(email) {
            return Err(DomainError::Validation {
                message: "Invalid email address format".to_string(),
            });
        }

        let mut verification_code = VerificationCode::new_with_expiration(
            user_id,
            email.to_string(),
            self.config.code_expiration_minutes,
        );
        verification_code.code = self.code_generator.generate();

        let verification_code = self
            .code_repository
            .replace_for_user(verification_code)
            .await?;

        tracing::info!(
            user_id = %user_id,
            email = %mask_email(email),
            code_id = %verification_code.id,
            expires_at = %verification_code.expires_at,
            event = "verification_code_generated",
            "Generated new verification code"
        );

        let message_id = self
            .email_service
            .send_verification_code(email, &verification_code.code)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %user_id,
                    email = %mask_email(email),
                    error = %e,
                    event = "verification_email_failed",
                    "Failed to deliver verification code"
                );
                AuthError::EmailDeliveryFailure { message: e }
            })?;

        tracing::info!(
            user_id = %user_id,
            message_id = %message_id,
            event = "verification_email_sent",
            "Verification code delivered"
        );

        Ok(IssuedCode {
            verification_code,
            message_id,
        })
    }

    /// Check `submitted` against the user's outstanding code
    ///
    /// Returns `Ok(false)` when no code is outstanding, the value differs, the
    /// code expired, it was issued for another email, or it was already
    /// consumed. On `Ok(true)` the code has been consumed and cannot be
    /// replayed. The user record is never touched.
    pub async fn validate_code(&self, user: &User, submitted: &str) -> DomainResult<bool> {
        let Some(code) = self.code_repository.find_by_user_id(user.id).await? else {
            tracing::info!(
                user_id = %user.id,
                event = "verification_code_missing",
                "No outstanding verification code"
            );
            return Ok(false);
        };

        if let Err(reason) = code.check(&user.email, submitted) {
            tracing::warn!(
                user_id = %user.id,
                code_id = %code.id,
                reason = %reason,
                event = "verification_code_invalid",
                "Verification code rejected"
            );
            return Ok(false);
        }

        // Lost race against a concurrent submission or a resend
        if !self.code_repository.mark_as_used(code.id).await? {
            tracing::warn!(
                user_id = %user.id,
                code_id = %code.id,
                event = "verification_code_replayed",
                "Verification code already consumed"
            );
            return Ok(false);
        }

        tracing::info!(
            user_id = %user.id,
            code_id = %code.id,
            event = "verification_code_consumed",
            "Verification code accepted"
        );
        Ok(true)
    }
}
