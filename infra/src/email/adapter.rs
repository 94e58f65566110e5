//! Email Service Trait Adapter
//!
//! Implements the core `EmailServiceTrait` for any infrastructure
//! `EmailService`, rendering the verification template on the way.

use async_trait::async_trait;
use ev_core::services::verification::EmailServiceTrait;
use ev_shared::validation::is_valid_email;

use super::email_service::EmailService;
use super::templates::verification_email;

/// Adapter that implements the core EmailServiceTrait
pub struct EmailServiceAdapter {
    inner: Box<dyn EmailService>,
    /// Lifetime stated in the email body
    code_lifetime_minutes: i64,
}

impl EmailServiceAdapter {
    pub fn new(inner: Box<dyn EmailService>, code_lifetime_minutes: i64) -> Self {
        Self {
            inner,
            code_lifetime_minutes,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl EmailServiceTrait for EmailServiceAdapter {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String> {
        let message = verification_email(email, code, self.code_lifetime_minutes);
        self.inner
            .send_email(&message)
            .await
            .map_err(|e| e.to_string())
    }

    fn is_valid_email(&self, email: &str) -> bool {
        is_valid_email(email)
    }
}
