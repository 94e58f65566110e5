//! MySQL-specific database implementations
//!
//! MySQL implementations of the core repository traits using SQLx.

pub mod session_repository_impl;
pub mod user_repository_impl;
pub mod verification_code_repository_impl;

pub use session_repository_impl::MySqlSessionRepository;
pub use user_repository_impl::MySqlUserRepository;
pub use verification_code_repository_impl::MySqlVerificationCodeRepository;

use ev_core::errors::DomainError;
use sqlx::Row;
use uuid::Uuid;

/// Wrap a SQLx failure as an internal domain error
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, context, event = "database_error", "Database operation failed");
    DomainError::Internal {
        message: format!("{}: {}", context, err),
    }
}

/// Read a column as `T`
pub(crate) fn column<'r, T>(row: &'r sqlx::mysql::MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}

/// Read a `CHAR(36)` column as a UUID
pub(crate) fn uuid_column(row: &sqlx::mysql::MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in {}: {}", name, e),
    })
}
