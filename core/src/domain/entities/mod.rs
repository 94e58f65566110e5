//! Domain entities representing core business objects.

pub mod session;
pub mod user;
pub mod verification_code;

// Re-export commonly used types
pub use session::{Session, SESSION_ID_LENGTH};
pub use user::User;
pub use verification_code::{VerificationCode, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};
