//! In-memory store implementing the core repositories

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ev_core::domain::entities::{Session, User, VerificationCode};
use ev_core::errors::DomainError;
use ev_core::repositories::{SessionRepository, UserRepository, VerificationCodeRepository};
use ev_shared::validation::normalize_email;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct StoreState {
    users: HashMap<Uuid, User>,
    sessions: HashMap<String, Session>,
    /// One outstanding code per user
    codes: HashMap<Uuid, VerificationCode>,
}

/// Shared in-process store; clones share the same data
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live and expired sessions held
    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = normalize_email(email);
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Validation {
                message: "Email already registered".to_string(),
            });
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_email_verified(
        &self,
        user_id: Uuid,
        verified: bool,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.users.get_mut(&user_id) {
            Some(user) => {
                user.set_email_verified(verified);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, DomainError> {
        let state = self.state.read().await;
        Ok(state.sessions.get(id).cloned().map(|mut s| {
            s.fresh = false;
            s
        }))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Session>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        let mut state = self.state.write().await;
        state.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn update_expiration(
        &self,
        id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.sessions.get_mut(id) {
            Some(session) => {
                session.expires_at = expires_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.state.write().await.sessions.remove(id).is_some())
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.user_id != user_id);
        Ok((before - state.sessions.len()) as u64)
    }

    async fn replace_user_sessions(&self, session: Session) -> Result<u64, DomainError> {
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.user_id != session.user_id);
        let removed = (before - state.sessions.len()) as u64;
        state.sessions.insert(session.id.clone(), session);
        Ok(removed)
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        let now = Utc::now();
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.expires_at > now);
        Ok((before - state.sessions.len()) as u64)
    }
}

#[async_trait]
impl VerificationCodeRepository for InMemoryStore {
    async fn replace_for_user(
        &self,
        code: VerificationCode,
    ) -> Result<VerificationCode, DomainError> {
        let mut state = self.state.write().await;
        state.codes.insert(code.user_id, code.clone());
        Ok(code)
    }

    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<VerificationCode>, DomainError> {
        Ok(self.state.read().await.codes.get(&user_id).cloned())
    }

    async fn mark_as_used(&self, code_id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.codes.values_mut().find(|c| c.id == code_id) {
            Some(code) if !code.is_used => {
                code.mark_as_used();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.state.write().await.codes.remove(&user_id).is_some())
    }
}
