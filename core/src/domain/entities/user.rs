//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use ev_shared::validation::normalize_email;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, stored normalized (trimmed, lowercase)
    pub email: String,

    /// First name shown in the authenticated layout
    pub first_name: String,

    /// Whether the user has proven control of `email`
    pub email_verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, unverified user
    pub fn new(email: impl AsRef<str>, first_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email.as_ref()),
            first_name: first_name.into(),
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the email-verified flag
    pub fn set_email_verified(&mut self, verified: bool) {
        self.email_verified = verified;
        self.updated_at = Utc::now();
    }

    /// Name used when greeting the user, falling back to the email's local part
    pub fn display_name(&self) -> &str {
        if self.first_name.trim().is_empty() {
            self.email.split('@').next().unwrap_or(&self.email)
        } else {
            &self.first_name
        }
    }
}
