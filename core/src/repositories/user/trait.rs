//! User repository trait defining the interface for user data persistence.
//!
//! The verification flow only reads users and flips the email-verified flag;
//! account creation lives here so stores can be seeded.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations must make `update_email_verified` visible to every
/// subsequent read, including reads issued by concurrent requests for the
/// same user.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use ev_core::repositories::UserRepository;
/// use ev_core::domain::entities::user::User;
/// use ev_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn update_email_verified(&self, user_id: Uuid, verified: bool) -> Result<bool, DomainError> { Ok(false) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with this id
    /// * `Err(DomainError)` - Store failure
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by email address. The address is normalized before lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Errors
    /// * `DomainError::Validation` - Email already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Set the email-verified flag
    ///
    /// # Returns
    /// * `Ok(true)` - Flag written
    /// * `Ok(false)` - No such user
    async fn update_email_verified(&self, user_id: Uuid, verified: bool)
        -> Result<bool, DomainError>;
}
