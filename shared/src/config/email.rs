//! Email delivery configuration

use serde::{Deserialize, Serialize};

/// Development provider that writes messages to the log
pub const PROVIDER_LOG: &str = "log";

/// JSON mail API provider
pub const PROVIDER_HTTP: &str = "http";

/// Email provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Provider name ("log" or "http")
    pub provider: String,

    /// Send endpoint of the HTTP mail API
    pub api_url: String,

    /// API key sent in the `api-key` header
    pub api_key: String,

    /// Sender address
    pub from_address: String,

    /// Sender display name
    pub from_name: Option<String>,

    /// Maximum delivery attempts for retryable failures
    pub max_retries: u32,

    /// Initial retry delay in milliseconds, doubled on each retry
    pub retry_delay_ms: u64,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from(PROVIDER_LOG),
            api_url: String::from("https://api.brevo.com/v3/smtp/email"),
            api_key: String::new(),
            from_address: String::from("no-reply@mailgate.local"),
            from_name: Some(String::from("Mailgate")),
            max_retries: 3,
            retry_delay_ms: 500,
            request_timeout_secs: 10,
        }
    }
}

impl EmailConfig {
    /// Overlay `EMAIL_*` environment variables on top of `base`
    pub fn from_env_or(base: Self) -> Self {
        let mut config = base;
        if let Ok(provider) = std::env::var("EMAIL_PROVIDER") {
            config.provider = provider;
        }
        if let Ok(url) = std::env::var("EMAIL_API_URL") {
            config.api_url = url;
        }
        if let Ok(key) = std::env::var("EMAIL_API_KEY") {
            config.api_key = key;
        }
        if let Ok(from) = std::env::var("EMAIL_FROM_ADDRESS") {
            config.from_address = from;
        }
        if let Ok(name) = std::env::var("EMAIL_FROM_NAME") {
            config.from_name = Some(name).filter(|n| !n.trim().is_empty());
        }
        config
    }

    /// Whether `provider` names a supported implementation
    pub fn is_known_provider(&self) -> bool {
        matches!(self.provider.as_str(), PROVIDER_LOG | PROVIDER_HTTP)
    }

    /// Whether the HTTP provider has the credentials it needs
    pub fn is_http_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.from_address.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_providers() {
        let mut config = EmailConfig::default();
        assert!(config.is_known_provider());

        config.provider = PROVIDER_HTTP.to_string();
        assert!(config.is_known_provider());

        config.provider = "htpp".to_string();
        assert!(!config.is_known_provider());
    }
}
