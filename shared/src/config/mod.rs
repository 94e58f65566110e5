//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Sessions, verification codes and route targets
//! - `database` - Database connection and pool configuration
//! - `email` - Email delivery provider configuration
//! - `environment` - Environment detection and logging configuration

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, RouteConfig, SameSitePolicy, SessionConfig, VerificationConfig};
pub use database::DatabaseConfig;
pub use email::{EmailConfig, PROVIDER_HTTP, PROVIDER_LOG};
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::new("mysql://localhost:3306/mailgate_dev"),
            auth: AuthConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig::new("mysql://prod-db:3306/mailgate")
                .with_max_connections(50),
            auth: AuthConfig {
                session: SessionConfig {
                    secure: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            email: EmailConfig {
                provider: String::from("http"),
                ..Default::default()
            },
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Create the default configuration for an environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.auth.session.secure = true;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = Self::for_environment(env);
        config.database = DatabaseConfig::from_env_or(config.database);
        config.auth = AuthConfig::from_env_or(config.auth);
        config.email = EmailConfig::from_env_or(config.email);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_uses_secure_cookies() {
        let config = AppConfig::production();
        assert!(config.auth.session.secure);
        assert_eq!(config.email.provider, "http");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_staging_is_derived_from_development() {
        let config = AppConfig::for_environment(Environment::Staging);
        assert_eq!(config.environment, Environment::Staging);
        assert!(config.auth.session.secure);
        assert_eq!(config.email.provider, "log");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{ "auth": { "routes": { "default_landing": "/home" } } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.auth.routes.default_landing, "/home");
        assert_eq!(config.auth.routes.login_path, "/login");
        assert_eq!(config.auth.session.cookie_name, "auth_session");
    }
}
