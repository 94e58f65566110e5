//! Email Service Module
//!
//! Delivery of verification codes by email.
//!
//! ## Features
//!
//! - **Email Service Trait**: Common interface for all providers
//! - **Log Implementation**: Writes messages to the log for development
//! - **HTTP Support**: JSON mail API (Brevo-compatible) with retries
//! - **Adapter**: Bridges any provider onto the core delivery trait
//! - **Security**: Email address masking in logs

pub mod adapter;
pub mod email_service;
pub mod http_email;
pub mod log_email;
pub mod templates;

pub use adapter::EmailServiceAdapter;
pub use email_service::{EmailMessage, EmailService};
pub use http_email::{HttpEmailConfig, HttpEmailService};
pub use log_email::LogEmailService;

use ev_shared::config::{EmailConfig, PROVIDER_HTTP, PROVIDER_LOG};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an email service based on configuration
///
/// The logging provider is only used when configured explicitly. An unknown
/// provider, or an `http` provider that cannot be built, is an error.
pub fn create_email_service(
    config: &EmailConfig,
) -> Result<Box<dyn EmailService>, InfrastructureError> {
    match config.provider.as_str() {
        PROVIDER_LOG => {
            tracing::warn!(
                event = "email_provider_log",
                "Log email provider selected; no email will be delivered"
            );
            Ok(Box::new(LogEmailService::new()))
        }
        PROVIDER_HTTP => {
            let service = HttpEmailService::new(HttpEmailConfig::from(config)).map_err(|e| {
                tracing::error!(
                    error = %e,
                    event = "email_provider_init_failed",
                    "Failed to initialize HTTP email service"
                );
                e
            })?;
            Ok(Box::new(service))
        }
        other => Err(InfrastructureError::Config(format!(
            "Unknown email provider: {}",
            other
        ))),
    }
}
