//! # Mailgate Core
//!
//! Core business logic and domain layer for the Mailgate backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types for email verification and cookie sessions.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Session, User, VerificationCode};
pub use domain::value_objects::{
    CookieAttributes, FlowAction, FlowResponse, FormOutcome, GuardOutcome, OutcomeKind, PageLoad,
    SessionCookie, VerificationPageState,
};
pub use errors::{AuthError, DomainError, DomainResult};
pub use repositories::{SessionRepository, UserRepository, VerificationCodeRepository};
pub use services::{
    AuthGuard, EmailServiceTrait, SessionManager, VerificationFlow, VerificationFlowConfig,
    VerificationService, VerificationServiceConfig,
};
