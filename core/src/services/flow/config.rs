//! Configuration for the verification flow

use ev_shared::config::AuthConfig;

/// Configuration for the verification flow
#[derive(Debug, Clone)]
pub struct VerificationFlowConfig {
    /// Rotate the session when a code is resent
    pub rotate_session_on_resend: bool,
    /// Login page unauthenticated users are sent to
    pub login_path: String,
    /// Landing page when no usable redirect target was supplied
    pub default_landing: String,
}

impl Default for VerificationFlowConfig {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

impl From<&AuthConfig> for VerificationFlowConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            rotate_session_on_resend: config.verification.rotate_session_on_resend,
            login_path: config.routes.login_path.clone(),
            default_landing: config.routes.default_landing.clone(),
        }
    }
}
