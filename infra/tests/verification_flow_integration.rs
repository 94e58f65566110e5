//! Integration tests for the verification flow over the in-memory store

use std::sync::Arc;

use ev_core::domain::value_objects::{FlowAction, OutcomeKind, PageLoad};
use ev_core::errors::{AuthError, DomainError};
use ev_core::repositories::UserRepository;
use ev_core::{
    AuthGuard, Session, SessionManager, User, VerificationFlow, VerificationFlowConfig,
    VerificationService, VerificationServiceConfig,
};
use ev_infra::email::LogEmailService;
use ev_infra::{EmailServiceAdapter, InMemoryStore};
use ev_shared::config::AuthConfig;

type Flow = VerificationFlow<InMemoryStore, InMemoryStore, InMemoryStore, EmailServiceAdapter>;

struct App {
    store: Arc<InMemoryStore>,
    outbox: LogEmailService,
    sessions: Arc<SessionManager<InMemoryStore>>,
    flow: Flow,
    guard: AuthGuard<InMemoryStore, InMemoryStore>,
}

impl App {
    fn new(outbox: LogEmailService) -> Self {
        let auth = AuthConfig::default();
        let store = Arc::new(InMemoryStore::new());
        let sessions = Arc::new(SessionManager::new(store.clone(), auth.session.clone()));
        let email = Arc::new(EmailServiceAdapter::new(
            Box::new(outbox.clone()),
            auth.verification.code_expiration_minutes,
        ));
        let verification = VerificationService::new(
            store.clone(),
            email,
            VerificationServiceConfig::from(&auth.verification),
        );
        let flow = VerificationFlow::new(
            store.clone(),
            sessions.clone(),
            verification,
            VerificationFlowConfig::from(&auth),
        );
        let guard = AuthGuard::new(store.clone(), sessions.clone(), auth.routes.login_path.clone());

        Self {
            store,
            outbox,
            sessions,
            flow,
            guard,
        }
    }

    async fn sign_up(&self, email: &str) -> (User, Session) {
        let user = UserRepository::create(self.store.as_ref(), User::new(email, "Ada"))
            .await
            .unwrap();
        let session = self.sessions.create_session(user.id).await.unwrap();
        (user, session)
    }

    async fn last_code(&self, email: &str) -> String {
        let message = self.outbox.last_message_to(email).await.unwrap();
        message
            .text
            .split_whitespace()
            .find(|word| word.len() == 6 && word.chars().all(|c| c.is_ascii_digit()))
            .unwrap()
            .to_string()
    }
}

#[tokio::test]
async fn test_resend_then_verify_end_to_end() {
    let app = App::new(LogEmailService::new());
    let (user, first) = app.sign_up("ada@example.com").await;

    let resent = app.flow.resend(Some(&first.id)).await.unwrap();
    assert_eq!(resent.form_outcome().unwrap().kind, OutcomeKind::CodeSent);
    let second = resent.set_cookie.unwrap().value;
    assert_ne!(second, first.id);

    // The session the code was requested from is gone
    assert!(!app.guard.check(Some(&first.id), "/user").await.unwrap().is_allowed());

    let code = app.last_code("ada@example.com").await;
    let verified = app.flow.verify(Some(&second), &code, None).await.unwrap();

    match &verified.action {
        FlowAction::Redirect { target, status } => {
            assert_eq!(target, "/user");
            assert_eq!(*status, 302);
        }
        other => panic!("expected redirect, got {:?}", other),
    }
    let third = verified.set_cookie.unwrap();
    assert!(third.to_header_value().starts_with(&format!("auth_session={}", third.value)));

    let stored = UserRepository::find_by_id(app.store.as_ref(), user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.email_verified);
    assert_eq!(app.store.session_count().await, 1);
    assert!(app.guard.check(Some(&third.value), "/user").await.unwrap().is_allowed());
}

#[tokio::test]
async fn test_code_cannot_be_replayed() {
    let app = App::new(LogEmailService::new());
    let (_, session) = app.sign_up("ada@example.com").await;
    let resent = app.flow.resend(Some(&session.id)).await.unwrap();
    let current = resent.set_cookie.unwrap().value;
    let code = app.last_code("ada@example.com").await;

    let first = app.flow.verify(Some(&current), &code, None).await.unwrap();
    let rotated = first.set_cookie.unwrap().value;

    let replay = app.flow.verify(Some(&rotated), &code, None).await.unwrap();
    assert_eq!(replay.form_outcome().unwrap().kind, OutcomeKind::InvalidCode);
}

#[tokio::test]
async fn test_concurrent_submissions_succeed_once() {
    let app = Arc::new(App::new(LogEmailService::new()));
    let (_, session) = app.sign_up("ada@example.com").await;
    let current = app
        .flow
        .resend(Some(&session.id))
        .await
        .unwrap()
        .set_cookie
        .unwrap()
        .value;
    let code = app.last_code("ada@example.com").await;

    let mut handles = Vec::new();
    for _ in 0..4 {
        let app = app.clone();
        let current = current.clone();
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            app.flow.verify(Some(&current), &code, None).await
        }));
    }

    let mut redirects = 0;
    for handle in handles {
        if let Ok(response) = handle.await.unwrap() {
            if response.redirect_target().is_some() {
                redirects += 1;
            }
        }
    }

    assert_eq!(redirects, 1);
    assert_eq!(app.store.session_count().await, 1);
}

#[tokio::test]
async fn test_delivery_failure_keeps_session() {
    let app = App::new(LogEmailService::failing());
    let (_, session) = app.sign_up("ada@example.com").await;

    let result = app.flow.resend(Some(&session.id)).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailDeliveryFailure { .. }))
    ));
    assert!(app.guard.check(Some(&session.id), "/user").await.unwrap().is_allowed());
}

#[tokio::test]
async fn test_anonymous_visitor_is_sent_to_login() {
    let app = App::new(LogEmailService::new());

    let load = app.flow.load(None, "/email-verification").await.unwrap();
    match load {
        PageLoad::Redirect { target, status } => {
            assert_eq!(target, "/login?redirectTo=%2Femail-verification");
            assert_eq!(status, 302);
        }
        other => panic!("expected redirect, got {:?}", other),
    }

    let verify = app.flow.verify(Some("unknown"), "123456", None).await;
    assert!(matches!(verify, Err(DomainError::Unauthorized)));
}

#[tokio::test]
async fn test_logout_and_cleanup() {
    let app = App::new(LogEmailService::new());
    let (user, session) = app.sign_up("ada@example.com").await;
    app.sessions.create_session(user.id).await.unwrap();
    assert_eq!(app.store.session_count().await, 2);

    assert!(app.sessions.invalidate_session(&session.id).await.unwrap());
    let blank = app.sessions.blank_cookie();
    assert!(blank.is_blank());
    assert!(blank.to_header_value().contains("Max-Age=0"));

    assert_eq!(app.sessions.delete_expired_sessions().await.unwrap(), 0);
    assert_eq!(app.store.session_count().await, 1);
}
