//! End-to-end email verification over the in-memory store
//!
//! Run with: cargo run -p ev_infra --example verification_flow
//!
//! Uses the configured email provider (`log` unless `EMAIL_PROVIDER` says
//! otherwise) and reads the issued code back from the store.

use std::sync::Arc;

use anyhow::Context;
use ev_core::domain::value_objects::{FlowAction, PageLoad};
use ev_core::repositories::{UserRepository, VerificationCodeRepository};
use ev_core::{
    AuthGuard, SessionManager, User, VerificationFlow, VerificationFlowConfig,
    VerificationService, VerificationServiceConfig,
};
use ev_infra::{create_email_service, init_tracing, load_config, EmailServiceAdapter, InMemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("loading configuration")?;
    init_tracing(&config.logging).context("initializing tracing")?;

    let store = Arc::new(InMemoryStore::new());
    let sessions = Arc::new(SessionManager::new(store.clone(), config.auth.session.clone()));
    let email = Arc::new(EmailServiceAdapter::new(
        create_email_service(&config.email).context("creating email provider")?,
        config.auth.verification.code_expiration_minutes,
    ));
    let verification = VerificationService::new(
        store.clone(),
        email,
        VerificationServiceConfig::from(&config.auth.verification),
    );
    let flow = VerificationFlow::new(
        store.clone(),
        sessions.clone(),
        verification,
        VerificationFlowConfig::from(&config.auth),
    );
    let guard = AuthGuard::new(
        store.clone(),
        sessions.clone(),
        config.auth.routes.login_path.clone(),
    );

    // Someone who just signed up
    let user = UserRepository::create(store.as_ref(), User::new("ada@example.com", "Ada")).await?;
    let session = sessions.create_session(user.id).await?;
    println!("Signed in as {} (session {})", user.email, session.id);

    println!("\n=== Anonymous visit ===");
    if let PageLoad::Redirect { target, status } =
        flow.load(None, &config.auth.routes.verification_path).await?
    {
        println!("{} -> {}", status, target);
    }

    println!("\n=== Resend ===");
    let response = flow.resend(Some(&session.id)).await?;
    if let Some(outcome) = response.form_outcome() {
        println!("{}: {}", outcome.status, outcome.message);
    }
    let current = response
        .set_cookie
        .as_ref()
        .map(|c| c.value.clone())
        .unwrap_or_else(|| session.id.clone());
    if let Some(cookie) = &response.set_cookie {
        println!("Set-Cookie: {}", cookie.to_header_value());
    }

    let code = VerificationCodeRepository::find_by_user_id(store.as_ref(), user.id)
        .await?
        .context("no code was issued")?;

    println!("\n=== Wrong code ===");
    let response = flow.verify(Some(&current), "000000", None).await?;
    if let Some(outcome) = response.form_outcome() {
        println!("{}: {}", outcome.status, outcome.message);
    }

    println!("\n=== Correct code ===");
    let response = flow
        .verify(Some(&current), &code.code, Some("/user/settings"))
        .await?;
    if let FlowAction::Redirect { target, status } = &response.action {
        println!("{} -> {}", status, target);
    }
    let cookie = response.set_cookie.context("verification must rotate the session")?;
    println!("Set-Cookie: {}", cookie.to_header_value());

    let verified = UserRepository::find_by_id(store.as_ref(), user.id)
        .await?
        .map(|u| u.email_verified)
        .unwrap_or(false);
    println!("email_verified = {}", verified);

    let stale = guard.check(Some(&current), "/user").await?;
    let fresh = guard.check(Some(&cookie.value), "/user").await?;
    println!("previous session allowed: {}", stale.is_allowed());
    println!("rotated session allowed: {}", fresh.is_allowed());

    println!("\n=== Logout ===");
    sessions.invalidate_session(&cookie.value).await?;
    println!("Set-Cookie: {}", sessions.blank_cookie().to_header_value());
    println!("live sessions: {}", store.session_count().await);

    Ok(())
}
