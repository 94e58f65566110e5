//! Session entity for cookie-based authentication.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a session identifier
pub const SESSION_ID_LENGTH: usize = 40;

/// Lowercase base32 alphabet used for session identifiers
const SESSION_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz234567";

/// An authenticated session owned by a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Random identifier, also the session cookie value
    pub id: String,

    /// User this session belongs to
    pub user_id: Uuid,

    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the session expires
    pub expires_at: DateTime<Utc>,

    /// Set when the expiry was just extended and the cookie must be re-sent.
    /// Never persisted.
    #[serde(skip)]
    pub fresh: bool,
}

impl Session {
    /// Creates a new session lasting `lifetime_seconds`
    pub fn new(user_id: Uuid, lifetime_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Self::generate_id(),
            user_id,
            created_at: now,
            expires_at: now + Duration::seconds(lifetime_seconds),
            fresh: true,
        }
    }

    /// Generates a random session identifier using the OS CSPRNG.
    ///
    /// 40 characters from a 32-symbol alphabet give 200 bits of entropy.
    pub fn generate_id() -> String {
        let mut rng = OsRng;
        (0..SESSION_ID_LENGTH)
            .map(|_| {
                let idx = rng.gen_range(0..SESSION_ID_ALPHABET.len());
                SESSION_ID_ALPHABET[idx] as char
            })
            .collect()
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Seconds until the session expires, zero once expired
    pub fn seconds_until_expiration(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }

    /// Whether the remaining lifetime has dropped below `threshold_seconds`
    pub fn needs_refresh(&self, threshold_seconds: i64) -> bool {
        !self.is_expired() && self.seconds_until_expiration() < threshold_seconds
    }

    /// Pushes the expiry to `lifetime_seconds` from now and marks the session fresh
    pub fn extend(&mut self, lifetime_seconds: i64) {
        self.expires_at = Utc::now() + Duration::seconds(lifetime_seconds);
        self.fresh = true;
    }
}
