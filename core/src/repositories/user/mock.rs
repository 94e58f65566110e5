//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use ev_shared::validation::normalize_email;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    fail_updates: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            fail_updates: AtomicBool::new(false),
        }
    }

    /// Create a repository seeded with `users`
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: Arc::new(RwLock::new(map)),
            fail_updates: AtomicBool::new(false),
        }
    }

    /// Make subsequent `update_email_verified` calls fail with a store error
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = normalize_email(email);
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Validation {
                message: "Email already registered".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_email_verified(
        &self,
        user_id: Uuid,
        verified: bool,
    ) -> Result<bool, DomainError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "User store unavailable".to_string(),
            });
        }
        let mut users = self.users.write().await;
        match users.get_mut(&user_id) {
            Some(user) => {
                user.set_email_verified(verified);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
