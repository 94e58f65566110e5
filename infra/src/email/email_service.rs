//! Email Service Interface
//!
//! Defines the trait for providers that deliver verification codes and other
//! transactional mail.

use async_trait::async_trait;

use crate::InfrastructureError;

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Email service trait for sending transactional mail
///
/// Implementations include:
/// - HTTP JSON mail API
/// - Logging implementation for development
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a message
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Name of the provider (e.g. "http", "log")
    fn provider_name(&self) -> &str;

    /// Health check; the default implementation always reports available
    async fn is_available(&self) -> bool {
        true
    }
}
