use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::domain::lockout::models::LockoutRecord;

/// Persistence operations for failed-login counters.
#[async_trait]
pub trait LockoutRepository: Send + Sync + 'static {
    /// Retrieve the record for a username.
    ///
    /// # Returns
    /// Optional record (None if the username never failed a login)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find(&self, username: &str) -> Result<Option<LockoutRecord>, AccountError>;

    /// Increment the failure count and set the last failure time, creating
    /// the record on first failure. Must be a single atomic write.
    ///
    /// # Returns
    /// The record after the increment
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn record_failure(
        &self,
        username: &str,
        at: DateTime<Utc>,
    ) -> Result<LockoutRecord, AccountError>;

    /// Clear the record back to zero failures and the epoch timestamp.
    ///
    /// A username without a record is left without one.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn reset(&self, username: &str) -> Result<(), AccountError>;
}
