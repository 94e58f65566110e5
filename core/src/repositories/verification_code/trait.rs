//! Verification code repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

/// Repository trait for verification code persistence
///
/// A user has at most one outstanding code. Implementations must make
/// `replace_for_user` and `mark_as_used` atomic with respect to each other,
/// so a code superseded or consumed by one request cannot be consumed again
/// by a concurrent one.
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Store `code` as the user's only code, dropping any previous one
    async fn replace_for_user(&self, code: VerificationCode)
        -> Result<VerificationCode, DomainError>;

    /// The user's current code, consumed or not
    async fn find_by_user_id(&self, user_id: Uuid)
        -> Result<Option<VerificationCode>, DomainError>;

    /// Consume a code if it is still unused
    ///
    /// # Returns
    /// * `Ok(true)` - This call consumed the code
    /// * `Ok(false)` - Already consumed, superseded or unknown
    async fn mark_as_used(&self, code_id: Uuid) -> Result<bool, DomainError>;

    /// Delete the user's code. Returns whether one existed.
    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool, DomainError>;
}
