//! Session manager implementation

use std::sync::Arc;

use ev_shared::config::SessionConfig;
use uuid::Uuid;

use crate::domain::entities::session::Session;
use crate::domain::value_objects::SessionCookie;
use crate::errors::DomainResult;
use crate::repositories::SessionRepository;

/// Issues, validates, rotates and revokes sessions
pub struct SessionManager<R: SessionRepository> {
    repository: Arc<R>,
    config: SessionConfig,
}

impl<R: SessionRepository> SessionManager<R> {
    pub fn new(repository: Arc<R>, config: SessionConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Resolve a session id to a live session
    ///
    /// Unknown ids yield `None`. Expired sessions are deleted and yield `None`.
    /// A session inside the refresh window has its expiry pushed out to a full
    /// lifetime and is returned with `fresh` set, so the caller re-sends the
    /// cookie.
    pub async fn validate_session(&self, session_id: &str) -> DomainResult<Option<Session>> {
        if session_id.is_empty() {
            return Ok(None);
        }

        let Some(mut session) = self.repository.find_by_id(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.repository.delete(&session.id).await?;
            tracing::info!(
                user_id = %session.user_id,
                event = "session_expired",
                "Removed expired session"
            );
            return Ok(None);
        }

        session.fresh = false;
        if session.needs_refresh(self.config.refresh_threshold()) {
            session.extend(self.config.timeout);
            self.repository
                .update_expiration(&session.id, session.expires_at)
                .await?;
            tracing::debug!(
                user_id = %session.user_id,
                expires_at = %session.expires_at,
                event = "session_refreshed",
                "Extended session expiry"
            );
        }

        Ok(Some(session))
    }

    /// Issue a new session for `user_id`, leaving existing ones alone
    pub async fn create_session(&self, user_id: Uuid) -> DomainResult<Session> {
        let session = self
            .repository
            .create(Session::new(user_id, self.config.timeout))
            .await?;

        tracing::info!(
            user_id = %user_id,
            event = "session_created",
            "Created session"
        );
        Ok(session)
    }

    /// Revoke a single session, as on logout
    pub async fn invalidate_session(&self, session_id: &str) -> DomainResult<bool> {
        let removed = self.repository.delete(session_id).await?;
        if removed {
            tracing::info!(event = "session_invalidated", "Invalidated session");
        }
        Ok(removed)
    }

    /// Revoke every session of `user_id`. Succeeds when there are none.
    pub async fn invalidate_all_sessions(&self, user_id: Uuid) -> DomainResult<u64> {
        let removed = self.repository.delete_by_user_id(user_id).await?;
        tracing::info!(
            user_id = %user_id,
            removed = removed,
            event = "sessions_invalidated",
            "Invalidated all sessions for user"
        );
        Ok(removed)
    }

    /// Replace all of the user's sessions with exactly one new session.
    ///
    /// The store performs deletion and insertion as one unit; the returned
    /// session is the one the cookie must carry.
    pub async fn rotate_session(&self, user_id: Uuid) -> DomainResult<Session> {
        let session = Session::new(user_id, self.config.timeout);
        let replaced = self.repository.replace_user_sessions(session.clone()).await?;

        tracing::info!(
            user_id = %user_id,
            replaced = replaced,
            event = "session_rotated",
            "Rotated user sessions"
        );
        Ok(session)
    }

    pub fn cookie_for(&self, session: &Session) -> SessionCookie {
        SessionCookie::for_session(session, &self.config)
    }

    pub fn blank_cookie(&self) -> SessionCookie {
        SessionCookie::blank(&self.config)
    }

    /// Purge expired sessions from the store
    pub async fn delete_expired_sessions(&self) -> DomainResult<u64> {
        let removed = self.repository.delete_expired().await?;
        tracing::info!(
            removed = removed,
            event = "expired_sessions_deleted",
            "Deleted expired sessions"
        );
        Ok(removed)
    }
}
