//! Repository traits forming the persistence boundary of the domain.

pub mod session;
pub mod user;
pub mod verification_code;

pub use session::SessionRepository;
pub use user::UserRepository;
pub use verification_code::VerificationCodeRepository;

#[cfg(test)]
pub use session::MockSessionRepository;
#[cfg(test)]
pub use user::MockUserRepository;
#[cfg(test)]
pub use verification_code::MockVerificationCodeRepository;
