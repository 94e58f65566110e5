//! Log Email Service Implementation
//!
//! Development provider that writes messages to the log instead of sending
//! them.

use async_trait::async_trait;
use ev_shared::validation::{is_valid_email, mask_email};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// Most recent messages kept for inspection; older ones are dropped
pub const OUTBOX_CAPACITY: usize = 64;

/// Log-only email service for development and testing
///
/// This implementation:
/// - Validates recipient addresses
/// - Logs each message with the recipient masked
/// - Generates local message IDs
/// - Keeps the last `OUTBOX_CAPACITY` messages for inspection
#[derive(Clone)]
pub struct LogEmailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Most recently accepted messages, oldest first
    outbox: Arc<Mutex<VecDeque<EmailMessage>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl LogEmailService {
    /// Create a new log email service
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: Arc::new(Mutex::new(VecDeque::with_capacity(OUTBOX_CAPACITY))),
            simulate_failure: false,
        }
    }

    /// Create a service whose every send fails
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::new()
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Number of messages currently held in the outbox
    pub async fn outbox_len(&self) -> usize {
        self.outbox.lock().await.len()
    }

    /// Most recent message sent to `email`
    pub async fn last_message_to(&self, email: &str) -> Option<EmailMessage> {
        let outbox = self.outbox.lock().await;
        outbox.iter().rev().find(|m| m.to == email).cloned()
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }
}

impl Default for LogEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailService for LogEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        if !is_valid_email(&message.to) {
            return Err(InfrastructureError::Email(format!(
                "Invalid recipient address: {}",
                mask_email(&message.to)
            )));
        }

        if self.simulate_failure {
            tracing::warn!(
                to = %mask_email(&message.to),
                "Log email service simulating failure"
            );
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        let message_id = format!("log_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            message_id = %message_id,
            count = count,
            event = "email_logged",
            "Email accepted by log provider"
        );
        // Development only: the body carries the code
        tracing::debug!(body = %message.text, "Email body");

        let mut outbox = self.outbox.lock().await;
        if outbox.len() == OUTBOX_CAPACITY {
            outbox.pop_front();
        }
        outbox.push_back(message.clone());
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "log"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure
    }
}
