//! Verification service module for email ownership checks
//!
//! This module provides the code workflow:
//! - Code generation, persistence and delivery by email
//! - Constant-time validation bound to the user's current email
//! - One-shot consumption of a matched code

mod config;
mod service;
mod traits;
mod types;


pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::{CodeGenerator, EmailServiceTrait, RandomCodeGenerator};
pub use types::IssuedCode;
