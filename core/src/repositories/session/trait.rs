//! Session repository trait defining the interface for session persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::session::Session;
use crate::errors::DomainError;

/// Repository trait for Session persistence operations
///
/// # Consistency
///
/// Concurrent requests for the same user may race on rotation. Implementations
/// must execute `replace_user_sessions` as one atomic unit (a single lock or a
/// database transaction), so no reader ever observes the user with zero or
/// with two live sessions in the middle of a rotation, and two concurrent
/// rotations leave exactly one session behind.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Find a session by its identifier, expired or not
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, DomainError>;

    /// All sessions owned by a user
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Session>, DomainError>;

    /// Persist a new session
    async fn create(&self, session: Session) -> Result<Session, DomainError>;

    /// Move a session's expiry
    ///
    /// # Returns
    /// * `Ok(true)` - Expiry updated
    /// * `Ok(false)` - Session no longer exists
    async fn update_expiration(
        &self,
        id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Delete one session. Returns whether it existed.
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;

    /// Delete every session of a user. Idempotent; returns the number removed.
    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<u64, DomainError>;

    /// Atomically delete every session of `session.user_id` and insert `session`
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of sessions that were replaced
    async fn replace_user_sessions(&self, session: Session) -> Result<u64, DomainError>;

    /// Remove sessions whose expiry lies in the past. Returns the number removed.
    async fn delete_expired(&self) -> Result<u64, DomainError>;
}
