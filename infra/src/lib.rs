//! # Infrastructure Layer
//!
//! Concrete implementations behind the Mailgate core traits.
//!
//! ## Architecture
//!
//! - **Memory**: in-process store for users, sessions and codes
//! - **Database**: MySQL repositories using SQLx
//! - **Email**: email delivery providers (logging, HTTP JSON API)
//! - **Bootstrap**: configuration loading and tracing subscriber setup
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use ev_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email delivery providers
pub mod email;

/// Tracing subscriber bootstrap
pub mod logging;

/// In-memory store implementing every core repository
pub mod memory;

/// Configuration loading from files, `.env` and the process environment
pub mod settings;

pub use email::{create_email_service, EmailServiceAdapter};
pub use logging::init_tracing;
pub use memory::InMemoryStore;
pub use settings::load_config;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<::config::ConfigError> for InfrastructureError {
    fn from(err: ::config::ConfigError) -> Self {
        InfrastructureError::Config(err.to_string())
    }
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
