//! Email verification flow: page load, code submission and resend.

mod config;
mod service;


pub use config::VerificationFlowConfig;
pub use service::VerificationFlow;
