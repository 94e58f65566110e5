//! Session cookie descriptor handed to the transport layer.

use ev_shared::config::{SameSitePolicy, SessionConfig};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Session;

/// Attributes attached to the session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieAttributes {
    pub path: String,
    /// Lifetime in seconds; zero tells the browser to drop the cookie
    pub max_age: i64,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSitePolicy,
}

/// Name/value/attributes triple for a `Set-Cookie` instruction.
///
/// Never persisted; derived from a [`Session`] on each response that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub attributes: CookieAttributes,
}

impl SessionCookie {
    /// Cookie carrying `session`'s identifier for its remaining lifetime
    pub fn for_session(session: &Session, config: &SessionConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            value: session.id.clone(),
            attributes: Self::attributes(config, session.seconds_until_expiration()),
        }
    }

    /// Empty cookie that clears the session on the client
    pub fn blank(config: &SessionConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            value: String::new(),
            attributes: Self::attributes(config, 0),
        }
    }

    fn attributes(config: &SessionConfig, max_age: i64) -> CookieAttributes {
        CookieAttributes {
            path: config.cookie_path.clone(),
            max_age,
            http_only: config.http_only,
            secure: config.secure,
            same_site: config.same_site,
        }
    }

    /// Whether this cookie removes the session instead of setting one
    pub fn is_blank(&self) -> bool {
        self.value.is_empty()
    }

    /// Renders the value of a `Set-Cookie` header
    pub fn to_header_value(&self) -> String {
        let mut header = format!(
            "{}={}; Path={}; Max-Age={}",
            self.name, self.value, self.attributes.path, self.attributes.max_age
        );
        if self.attributes.http_only {
            header.push_str("; HttpOnly");
        }
        if self.attributes.secure {
            header.push_str("; Secure");
        }
        header.push_str("; SameSite=");
        header.push_str(self.attributes.same_site.as_str());
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_cookie_for_session() {
        let config = SessionConfig::default();
        let session = Session::new(Uuid::new_v4(), config.timeout);
        let cookie = SessionCookie::for_session(&session, &config);

        assert_eq!(cookie.name, "auth_session");
        assert_eq!(cookie.value, session.id);
        assert_eq!(cookie.attributes.path, "/");
        assert!(cookie.attributes.http_only);
        assert!(!cookie.attributes.secure);
        assert_eq!(cookie.attributes.same_site, SameSitePolicy::Lax);
        assert!(cookie.attributes.max_age > config.timeout - 5);
        assert!(!cookie.is_blank());
    }

    #[test]
    fn test_header_value() {
        let config = SessionConfig {
            secure: true,
            ..SessionConfig::default()
        };
        let mut session = Session::new(Uuid::new_v4(), 3600);
        session.id = "abc234".to_string();
        let mut cookie = SessionCookie::for_session(&session, &config);
        cookie.attributes.max_age = 3600;

        assert_eq!(
            cookie.to_header_value(),
            "auth_session=abc234; Path=/; Max-Age=3600; HttpOnly; Secure; SameSite=Lax"
        );
    }

    #[test]
    fn test_blank_cookie() {
        let config = SessionConfig::default();
        let cookie = SessionCookie::blank(&config);

        assert!(cookie.is_blank());
        assert_eq!(cookie.attributes.max_age, 0);
        assert_eq!(
            cookie.to_header_value(),
            "auth_session=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax"
        );
    }
}
