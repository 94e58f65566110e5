//! Session management: validation with sliding expiry, creation, rotation
//! and cookie derivation.

mod service;


pub use service::SessionManager;
