//! Authentication configuration: sessions, verification codes and route targets

use serde::{Deserialize, Serialize};

/// Session cookie name used when nothing else is configured
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "auth_session";

/// SameSite attribute of the session cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    Strict,
    Lax,
    None,
}

impl SameSitePolicy {
    /// Attribute value as written in a `Set-Cookie` header
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSitePolicy::Strict => "Strict",
            SameSitePolicy::Lax => "Lax",
            SameSitePolicy::None => "None",
        }
    }
}

impl Default for SameSitePolicy {
    fn default() -> Self {
        SameSitePolicy::Lax
    }
}

impl std::str::FromStr for SameSitePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(SameSitePolicy::Strict),
            "lax" => Ok(SameSitePolicy::Lax),
            "none" => Ok(SameSitePolicy::None),
            _ => Err(format!("Invalid SameSite policy: {}", s)),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session lifetime in seconds
    pub timeout: i64,

    /// Session cookie name
    pub cookie_name: String,

    /// Session cookie path
    pub cookie_path: String,

    /// Session cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Session cookie SameSite attribute
    pub same_site: SameSitePolicy,

    /// Session cookie HttpOnly flag
    pub http_only: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: 60 * 60 * 24 * 30, // 30 days
            cookie_name: String::from(DEFAULT_SESSION_COOKIE_NAME),
            cookie_path: String::from("/"),
            secure: false, // Set to true in production
            same_site: SameSitePolicy::Lax,
            http_only: true,
        }
    }
}

impl SessionConfig {
    /// Remaining lifetime (seconds) below which a validated session is extended
    pub fn refresh_threshold(&self) -> i64 {
        self.timeout / 2
    }
}

/// Verification code configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Minutes before an issued code expires
    pub code_expiration_minutes: i64,

    /// Rotate the session when a code is resent
    pub rotate_session_on_resend: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: 15,
            rotate_session_on_resend: true,
        }
    }
}

/// Route targets used for redirects
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Login page unauthenticated users are sent to
    pub login_path: String,

    /// Landing page after a successful verification
    pub default_landing: String,

    /// Email verification page
    pub verification_path: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login_path: String::from("/login"),
            default_landing: String::from("/user"),
            verification_path: String::from("/email-verification"),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Session configuration
    pub session: SessionConfig,

    /// Verification code configuration
    pub verification: VerificationConfig,

    /// Redirect targets
    pub routes: RouteConfig,
}

impl AuthConfig {
    /// Overlay environment variables on top of `base`
    pub fn from_env_or(base: Self) -> Self {
        let mut config = base;

        if let Some(timeout) = env_parse("SESSION_TIMEOUT") {
            config.session.timeout = timeout;
        }
        if let Ok(name) = std::env::var("SESSION_COOKIE_NAME") {
            config.session.cookie_name = name;
        }
        if let Some(secure) = env_parse("SESSION_COOKIE_SECURE") {
            config.session.secure = secure;
        }
        if let Some(same_site) = env_parse("SESSION_COOKIE_SAME_SITE") {
            config.session.same_site = same_site;
        }
        if let Some(minutes) = env_parse("VERIFICATION_CODE_EXPIRATION_MINUTES") {
            config.verification.code_expiration_minutes = minutes;
        }
        if let Some(rotate) = env_parse("VERIFICATION_ROTATE_ON_RESEND") {
            config.verification.rotate_session_on_resend = rotate;
        }
        if let Ok(path) = std::env::var("LOGIN_PATH") {
            config.routes.login_path = path;
        }
        if let Ok(path) = std::env::var("DEFAULT_LANDING_PATH") {
            config.routes.default_landing = path;
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
