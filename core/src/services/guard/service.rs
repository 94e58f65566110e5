//! Layout guard implementation

use std::sync::Arc;

use url::form_urlencoded::byte_serialize;

use crate::domain::entities::{Session, User};
use crate::domain::value_objects::{GuardOutcome, SessionCookie, REDIRECT_STATUS};
use crate::errors::DomainResult;
use crate::repositories::{SessionRepository, UserRepository};
use crate::services::session::SessionManager;

/// `<login_path>?redirectTo=<percent-encoded path>`
pub fn login_redirect_target(login_path: &str, path_and_query: &str) -> String {
    let encoded: String = byte_serialize(path_and_query.as_bytes()).collect();
    format!("{}?redirectTo={}", login_path, encoded)
}

/// Gatekeeper for pages that require a signed-in user
pub struct AuthGuard<U: UserRepository, S: SessionRepository> {
    users: Arc<U>,
    sessions: Arc<SessionManager<S>>,
    login_path: String,
}

impl<U: UserRepository, S: SessionRepository> AuthGuard<U, S> {
    pub fn new(users: Arc<U>, sessions: Arc<SessionManager<S>>, login_path: impl Into<String>) -> Self {
        Self {
            users,
            sessions,
            login_path: login_path.into(),
        }
    }

    /// Resolve the session cookie value to its session and owning user
    pub async fn resolve(&self, session_id: Option<&str>) -> DomainResult<Option<(Session, User)>> {
        resolve_user(self.users.as_ref(), &self.sessions, session_id).await
    }

    /// Admit the request or send it to the login page
    ///
    /// `path_and_query` is the requested location, carried through login as
    /// the `redirectTo` parameter.
    pub async fn check(
        &self,
        session_id: Option<&str>,
        path_and_query: &str,
    ) -> DomainResult<GuardOutcome> {
        match self.resolve(session_id).await? {
            Some((session, user)) => Ok(GuardOutcome::Allowed {
                user_id: user.id,
                display_name: user.display_name().to_string(),
                set_cookie: refresh_cookie(&self.sessions, &session),
            }),
            None => {
                tracing::debug!(
                    path = %path_and_query,
                    event = "guard_redirect",
                    "Unauthenticated request redirected to login"
                );
                Ok(GuardOutcome::Redirect {
                    target: login_redirect_target(&self.login_path, path_and_query),
                    status: REDIRECT_STATUS,
                })
            }
        }
    }
}

/// Session and user behind a cookie value, if both are still live
pub(crate) async fn resolve_user<U: UserRepository, S: SessionRepository>(
    users: &U,
    sessions: &SessionManager<S>,
    session_id: Option<&str>,
) -> DomainResult<Option<(Session, User)>> {
    let Some(session_id) = session_id else {
        return Ok(None);
    };
    let Some(session) = sessions.validate_session(session_id).await? else {
        return Ok(None);
    };

    match users.find_by_id(session.user_id).await? {
        Some(user) => Ok(Some((session, user))),
        None => {
            tracing::warn!(
                user_id = %session.user_id,
                event = "session_orphaned",
                "Session refers to a missing user"
            );
            Ok(None)
        }
    }
}

/// Cookie to re-send when validation just extended the session
pub(crate) fn refresh_cookie<S: SessionRepository>(
    sessions: &SessionManager<S>,
    session: &Session,
) -> Option<SessionCookie> {
    session.fresh.then(|| sessions.cookie_for(session))
}
