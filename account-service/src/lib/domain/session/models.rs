use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

/// Session issued on successful login.
///
/// The token is an opaque bearer credential; it expires `ttl` after issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        token: String,
        username: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            token,
            username: username.into(),
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    /// Whether the session is no longer valid at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_expiry() {
        let issued_at = Utc::now();
        let session = Session::new("abc".to_string(), "alice", issued_at, Duration::hours(24));

        assert_eq!(session.expires_at - session.issued_at, Duration::hours(24));
        assert!(!session.is_expired(issued_at));
        assert!(!session.is_expired(issued_at + Duration::hours(23)));
        assert!(session.is_expired(issued_at + Duration::hours(24)));
    }
}
