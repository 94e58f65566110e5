//! Domain layer containing business entities and value objects.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{Session, User, VerificationCode};
pub use value_objects::{FlowResponse, GuardOutcome, PageLoad, SessionCookie};
