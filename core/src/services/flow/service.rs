//! Verification flow controller

use std::sync::Arc;

use ev_shared::validation::is_safe_redirect_path;

use crate::domain::value_objects::{
    FlowResponse, FormOutcome, PageLoad, SessionCookie, VerificationPageState, REDIRECT_STATUS,
};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{SessionRepository, UserRepository, VerificationCodeRepository};
use crate::services::guard::login_redirect_target;
use crate::services::guard::service::{refresh_cookie, resolve_user};
use crate::services::session::SessionManager;
use crate::services::verification::{EmailServiceTrait, VerificationService};

use super::config::VerificationFlowConfig;

/// Drives a single verification attempt for the signed-in user.
///
/// Session ids arrive as explicit arguments; results come back as values
/// the transport layer turns into redirects, re-rendered forms and
/// `Set-Cookie` headers.
pub struct VerificationFlow<U, S, C, E>
where
    U: UserRepository,
    S: SessionRepository,
    C: VerificationCodeRepository,
    E: EmailServiceTrait,
{
    users: Arc<U>,
    sessions: Arc<SessionManager<S>>,
    verification: VerificationService<C, E>,
    config: VerificationFlowConfig,
}

impl<U, S, C, E> VerificationFlow<U, S, C, E>
where
    U: UserRepository,
    S: SessionRepository,
    C: VerificationCodeRepository,
    E: EmailServiceTrait,
{
    pub fn new(
        users: Arc<U>,
        sessions: Arc<SessionManager<S>>,
        verification: VerificationService<C, E>,
        config: VerificationFlowConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            verification,
            config,
        }
    }

    /// Data for rendering the verification page
    ///
    /// Unauthenticated visitors are redirected to login with `path` as the
    /// return location.
    pub async fn load(&self, session_id: Option<&str>, path: &str) -> DomainResult<PageLoad> {
        match resolve_user(self.users.as_ref(), &self.sessions, session_id).await? {
            Some((session, user)) => Ok(PageLoad::Render {
                state: VerificationPageState {
                    email: user.email.clone(),
                    email_verified: user.email_verified,
                },
                set_cookie: refresh_cookie(&self.sessions, &session),
            }),
            None => Ok(PageLoad::Redirect {
                target: login_redirect_target(&self.config.login_path, path),
                status: REDIRECT_STATUS,
            }),
        }
    }

    /// Check a submitted code and, on success, mark the email verified
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::Unauthorized)` - No live session
    /// * `Ok` with an `EmptyInput` outcome - Blank submission; nothing changed
    /// * `Ok` with an `InvalidCode` outcome - Code rejected; nothing changed
    /// * `Ok` with a redirect and a new session cookie - Email verified and
    ///   the user's sessions replaced by exactly one new session
    ///
    /// The code is consumed before the user is marked verified. If that
    /// update fails, the error is returned, the code stays spent and the
    /// user remains unverified until a new code is requested with
    /// [`resend`](Self::resend).
    pub async fn verify(
        &self,
        session_id: Option<&str>,
        code: &str,
        redirect_to: Option<&str>,
    ) -> DomainResult<FlowResponse> {
        let Some((session, user)) =
            resolve_user(self.users.as_ref(), &self.sessions, session_id).await?
        else {
            return Err(DomainError::Unauthorized);
        };
        let refreshed = refresh_cookie(&self.sessions, &session);

        let code = code.trim();
        if code.is_empty() {
            return Ok(with_optional_cookie(
                FlowResponse::outcome(FormOutcome::empty_input()),
                refreshed,
            ));
        }

        if !self.verification.validate_code(&user, code).await? {
            return Ok(with_optional_cookie(
                FlowResponse::outcome(FormOutcome::invalid_code()),
                refreshed,
            ));
        }

        if !self.users.update_email_verified(user.id, true).await? {
            return Err(AuthError::UserNotFound.into());
        }
        tracing::info!(
            user_id = %user.id,
            event = "email_verified",
            "Email address verified"
        );

        let new_session = self.sessions.rotate_session(user.id).await?;
        let cookie = self.sessions.cookie_for(&new_session);

        Ok(FlowResponse::redirect(self.redirect_target(redirect_to)).with_cookie(cookie))
    }

    /// Issue and deliver a fresh code to the user's current email
    ///
    /// A delivery failure is returned as an error and leaves the session
    /// untouched.
    pub async fn resend(&self, session_id: Option<&str>) -> DomainResult<FlowResponse> {
        let Some((session, user)) =
            resolve_user(self.users.as_ref(), &self.sessions, session_id).await?
        else {
            return Err(DomainError::Unauthorized);
        };

        self.verification.generate_code(user.id, &user.email).await?;

        let cookie = if self.config.rotate_session_on_resend {
            let new_session = self.sessions.rotate_session(user.id).await?;
            Some(self.sessions.cookie_for(&new_session))
        } else {
            refresh_cookie(&self.sessions, &session)
        };

        Ok(with_optional_cookie(
            FlowResponse::outcome(FormOutcome::code_sent()),
            cookie,
        ))
    }

    fn redirect_target(&self, redirect_to: Option<&str>) -> String {
        match redirect_to {
            Some(target) if is_safe_redirect_path(target) => target.to_string(),
            Some(target) => {
                tracing::warn!(
                    redirect_to = %target,
                    event = "redirect_rejected",
                    "Ignoring unsafe redirect target"
                );
                self.config.default_landing.clone()
            }
            None => self.config.default_landing.clone(),
        }
    }
}

fn with_optional_cookie(response: FlowResponse, cookie: Option<SessionCookie>) -> FlowResponse {
    match cookie {
        Some(cookie) => response.with_cookie(cookie),
        None => response,
    }
}
