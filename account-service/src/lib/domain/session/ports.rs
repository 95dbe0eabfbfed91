use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::domain::session::models::Session;

/// Persistence operations for issued sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Persist a newly issued session.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, session: Session) -> Result<Session, AccountError>;

    /// Retrieve a session by token.
    ///
    /// # Returns
    /// Optional session (None if the token was never issued or was revoked)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find(&self, token: &str) -> Result<Option<Session>, AccountError>;

    /// Remove a session.
    ///
    /// # Returns
    /// True if a session was removed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, token: &str) -> Result<bool, AccountError>;

    /// Remove every session expired at `now`.
    ///
    /// # Returns
    /// Number of sessions removed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AccountError>;
}
