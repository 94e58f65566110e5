//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - MySQL implementations of the user, session and verification code
//!   repositories
//!
//! The schema lives in `infra/migrations/`.

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlSessionRepository, MySqlUserRepository, MySqlVerificationCodeRepository};
