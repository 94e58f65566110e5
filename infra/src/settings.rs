//! Configuration loading
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults for the detected environment
//! 2. Optional TOML file (`config.<environment>.toml` unless a path is given)
//! 3. `MAILGATE__SECTION__KEY` environment variables
//! 4. Flat variables such as `DATABASE_URL` or `SESSION_TIMEOUT`
//!
//! A `.env` file in the working directory is read first when present.

use std::path::Path;

use ::config::{Config, Environment as EnvSource, File, FileFormat};
use ev_shared::config::{
    AppConfig, AuthConfig, DatabaseConfig, EmailConfig, Environment, PROVIDER_HTTP,
};

use crate::InfrastructureError;

/// Prefix for nested environment overrides
pub const ENV_PREFIX: &str = "MAILGATE";

/// Load configuration for the environment named by `ENVIRONMENT`
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();
    load_config_from(environment, Path::new(environment.config_file()))
}

/// Load configuration for `environment`, reading `path` if it exists
pub fn load_config_from(
    environment: Environment,
    path: &Path,
) -> Result<AppConfig, InfrastructureError> {
    let defaults = AppConfig::for_environment(environment);

    let layered: AppConfig = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .add_source(EnvSource::with_prefix(ENV_PREFIX).separator("__").try_parsing(true))
        .build()?
        .try_deserialize()?;

    let mut config = layered;
    config.environment = environment;
    config.database = DatabaseConfig::from_env_or(config.database);
    config.auth = AuthConfig::from_env_or(config.auth);
    config.email = EmailConfig::from_env_or(config.email);
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        config.logging.level = level;
    }

    validate(&config)?;

    tracing::debug!(
        environment = %config.environment,
        email_provider = %config.email.provider,
        event = "config_loaded",
        "Configuration loaded"
    );
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), InfrastructureError> {
    if config.auth.session.timeout <= 0 {
        return Err(InfrastructureError::Config(
            "session timeout must be positive".to_string(),
        ));
    }
    if config.auth.verification.code_expiration_minutes <= 0 {
        return Err(InfrastructureError::Config(
            "verification code expiration must be positive".to_string(),
        ));
    }
    if config.auth.session.cookie_name.trim().is_empty() {
        return Err(InfrastructureError::Config(
            "session cookie name must not be empty".to_string(),
        ));
    }
    if !config.email.is_known_provider() {
        return Err(InfrastructureError::Config(format!(
            "unknown email provider: {}",
            config.email.provider
        )));
    }
    if config.email.provider == PROVIDER_HTTP && !config.email.is_http_configured() {
        return Err(InfrastructureError::Config(
            "http email provider requires api_url, api_key and from_address".to_string(),
        ));
    }
    Ok(())
}
