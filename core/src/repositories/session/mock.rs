//! Mock implementation of SessionRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::session::Session;
use crate::errors::DomainError;

use super::trait_::SessionRepository;

/// Mock session repository for testing
///
/// One write lock covers each mutation, which makes rotation atomic.
pub struct MockSessionRepository {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    should_fail: bool,
}

impl MockSessionRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            should_fail: false,
        }
    }

    /// Create a repository whose every call fails
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// Total number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::Internal {
                message: "Session store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockSessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, DomainError> {
        self.check_failure()?;
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned().map(|mut s| {
            s.fresh = false;
            s
        }))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Session>, DomainError> {
        self.check_failure()?;
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        self.check_failure()?;
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn update_expiration(
        &self,
        id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(id) {
            Some(session) => {
                session.expires_at = expires_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(id).is_some())
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<u64, DomainError> {
        self.check_failure()?;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != user_id);
        Ok((before - sessions.len()) as u64)
    }

    async fn replace_user_sessions(&self, session: Session) -> Result<u64, DomainError> {
        self.check_failure()?;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != session.user_id);
        let removed = (before - sessions.len()) as u64;
        sessions.insert(session.id.clone(), session);
        Ok(removed)
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        self.check_failure()?;
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }
}
