//! Shared utilities and common types for Mailgate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Utility functions (email validation, redirect checks, log masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, EmailConfig, Environment, LogFormat, LoggingConfig,
    RouteConfig, SameSitePolicy, SessionConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use utils::validation;
