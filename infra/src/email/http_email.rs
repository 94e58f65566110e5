//! HTTP Email Service Implementation
//!
//! Sends mail through a JSON mail API (Brevo `smtp/email` compatible):
//! `POST {api_url}` with an `api-key` header.
//!
//! ## Features
//!
//! - Automatic retry with exponential backoff on 429 and 5xx responses
//! - No retry on other client errors
//! - Request timeout
//! - Security: recipient masking in logs

use async_trait::async_trait;
use ev_shared::config::EmailConfig;
use ev_shared::validation::{is_valid_email, mask_email};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// HTTP email service configuration
#[derive(Debug, Clone)]
pub struct HttpEmailConfig {
    /// Send endpoint
    pub api_url: String,
    /// API key sent in the `api-key` header
    pub api_key: String,
    /// Sender address
    pub from_address: String,
    /// Sender display name
    pub from_name: Option<String>,
    /// Maximum attempts for retryable failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl From<&EmailConfig> for HttpEmailConfig {
    fn from(config: &EmailConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
            from_name: config.from_name.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
            request_timeout_secs: config.request_timeout_secs,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailAddress<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailBody<'a> {
    sender: EmailAddress<'a>,
    to: Vec<EmailAddress<'a>>,
    subject: &'a str,
    html_content: &'a str,
    text_content: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailResponse {
    message_id: Option<String>,
}

/// Outcome of a single delivery attempt
enum Attempt {
    Sent(String),
    Retry(String),
    Fail(String),
}

/// HTTP email service implementation
pub struct HttpEmailService {
    client: reqwest::Client,
    config: HttpEmailConfig,
}

impl HttpEmailService {
    /// Create a new HTTP email service
    pub fn new(config: HttpEmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "email api_key is required for the http provider".to_string(),
            ));
        }
        if !is_valid_email(&config.from_address) {
            return Err(InfrastructureError::Config(format!(
                "Invalid sender address: {}",
                config.from_address
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::info!(
            api_url = %config.api_url,
            from = %config.from_address,
            "HTTP email service initialized"
        );

        Ok(Self { client, config })
    }

    fn body<'a>(&'a self, message: &'a EmailMessage) -> SendEmailBody<'a> {
        SendEmailBody {
            sender: EmailAddress {
                email: &self.config.from_address,
                name: self.config.from_name.as_deref(),
            },
            to: vec![EmailAddress {
                email: &message.to,
                name: None,
            }],
            subject: &message.subject,
            html_content: &message.html,
            text_content: &message.text,
        }
    }

    async fn attempt(&self, message: &EmailMessage) -> Attempt {
        let response = match self
            .client
            .post(&self.config.api_url)
            .header("api-key", &self.config.api_key)
            .header("Accept", "application/json")
            .json(&self.body(message))
            .send()
            .await
        {
            Ok(response) => response,
            // Timeouts and connection failures are worth another try
            Err(e) => return Attempt::Retry(e.to_string()),
        };

        let status = response.status();
        if status.is_success() {
            let message_id = response
                .json::<SendEmailResponse>()
                .await
                .ok()
                .and_then(|r| r.message_id)
                .unwrap_or_else(|| format!("http_{}", Uuid::new_v4()));
            return Attempt::Sent(message_id);
        }

        let body = response.text().await.unwrap_or_default();
        let reason = format!("status={}: {}", status.as_u16(), body);
        if is_retryable(status) {
            Attempt::Retry(reason)
        } else {
            Attempt::Fail(reason)
        }
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        if !is_valid_email(&message.to) {
            return Err(InfrastructureError::Email(format!(
                "Invalid recipient address: {}",
                mask_email(&message.to)
            )));
        }

        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            tracing::debug!(
                to = %mask_email(&message.to),
                attempt = attempts,
                max_retries = self.config.max_retries,
                "Sending email"
            );

            match self.attempt(message).await {
                Attempt::Sent(message_id) => {
                    tracing::info!(
                        to = %mask_email(&message.to),
                        message_id = %message_id,
                        event = "email_sent",
                        "Email sent"
                    );
                    return Ok(message_id);
                }
                Attempt::Fail(reason) => {
                    tracing::error!(
                        to = %mask_email(&message.to),
                        reason = %reason,
                        event = "email_rejected",
                        "Mail API rejected the message"
                    );
                    return Err(InfrastructureError::Email(format!(
                        "Mail API rejected the message ({})",
                        reason
                    )));
                }
                Attempt::Retry(reason) => {
                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Email(format!(
                            "Failed to send email after {} attempts: {}",
                            attempts, reason
                        )));
                    }
                    tracing::warn!(
                        reason = %reason,
                        delay_ms = delay.as_millis() as u64,
                        "Retryable email failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(is_retryable(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_retryable(StatusCode::BAD_REQUEST));
        assert!(!is_retryable(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_request_body_shape() {
        let service = HttpEmailService::new(HttpEmailConfig {
            api_url: "https://mail.example.com/v3/smtp/email".to_string(),
            api_key: "key".to_string(),
            from_address: "no-reply@example.com".to_string(),
            from_name: Some("Mailgate".to_string()),
            max_retries: 1,
            retry_delay_ms: 1,
            request_timeout_secs: 1,
        })
        .unwrap();
        let message = EmailMessage {
            to: "ada@example.com".to_string(),
            subject: "Verify".to_string(),
            html: "<p>1</p>".to_string(),
            text: "1".to_string(),
        };

        let json = serde_json::to_value(service.body(&message)).unwrap();

        assert_eq!(json["sender"]["email"], "no-reply@example.com");
        assert_eq!(json["sender"]["name"], "Mailgate");
        assert_eq!(json["to"][0]["email"], "ada@example.com");
        assert!(json["to"][0].get("name").is_none());
        assert_eq!(json["htmlContent"], "<p>1</p>");
        assert_eq!(json["textContent"], "1");
    }

    #[test]
    fn test_response_message_id_parsing() {
        let parsed: SendEmailResponse =
            serde_json::from_str(r#"{"messageId":"<abc@smtp-relay>"}"#).unwrap();
        assert_eq!(parsed.message_id.as_deref(), Some("<abc@smtp-relay>"));

        let empty: SendEmailResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.message_id.is_none());
    }
}
