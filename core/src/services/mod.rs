//! Business services containing domain logic and use cases.

pub mod flow;
pub mod guard;
pub mod session;
pub mod verification;

// Re-export commonly used types
pub use flow::{VerificationFlow, VerificationFlowConfig};
pub use guard::{login_redirect_target, AuthGuard};
pub use session::SessionManager;
pub use verification::{
    CodeGenerator, EmailServiceTrait, IssuedCode, RandomCodeGenerator, VerificationService,
    VerificationServiceConfig,
};
