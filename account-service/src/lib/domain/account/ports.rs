use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::ImportedCredential;
use crate::account::models::LoginOutcome;
use crate::account::models::PasswordStrength;
use crate::account::models::RegisterCommand;
use crate::account::models::Username;
use crate::domain::lockout::models::LockStatus;
use crate::domain::session::models::Session;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account with validated credentials.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, password, and role
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `PasswordHashing` - Hashing the password failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError>;

    /// Authenticate a username/password pair and issue a session.
    ///
    /// Attempts made while the account is locked are rejected without being
    /// counted as failures.
    ///
    /// # Arguments
    /// * `username` - Raw username as typed
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Issued session and the account role
    ///
    /// # Errors
    /// * `AccountLocked` - Too many recent failures, or this failure reached the limit
    /// * `NotFound` - No account with this username
    /// * `WrongPassword` - Password does not match
    /// * `TokenGeneration` - Session token could not be generated
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AccountError>;

    /// Report the lock state of a username, clearing an expired lock.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn check_locked(&self, username: &str) -> Result<LockStatus, AccountError>;

    /// Advisory strength of a candidate password.
    fn check_password_strength(&self, password: &str) -> PasswordStrength;

    /// Resolve a session token to its live session.
    ///
    /// # Errors
    /// * `InvalidSession` - Token unknown, revoked, or expired
    /// * `DatabaseError` - Database operation failed
    async fn validate_session(&self, token: &str) -> Result<Session, AccountError>;

    /// Revoke a session token.
    ///
    /// # Errors
    /// * `InvalidSession` - Token unknown or already revoked
    /// * `DatabaseError` - Database operation failed
    async fn logout(&self, token: &str) -> Result<(), AccountError>;

    /// Retrieve an account by username.
    ///
    /// # Errors
    /// * `NotFound` - No account with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_account(&self, username: &Username) -> Result<Account, AccountError>;

    /// Retrieve all accounts ordered by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;

    /// Import pre-hashed credentials, skipping usernames that already exist.
    ///
    /// Imported accounts get the `user` role.
    ///
    /// # Returns
    /// Number of accounts created
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn import_credentials(
        &self,
        credentials: Vec<ImportedCredential>,
    ) -> Result<usize, AccountError>;
}

/// Persistence operations for account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// Uniqueness is enforced by the storage layer in the same statement as
    /// the insert.
    ///
    /// # Arguments
    /// * `account` - Account entity to create
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Persist an account unless the username is already taken.
    ///
    /// # Returns
    /// True if the account was inserted
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_if_absent(&self, account: Account) -> Result<bool, AccountError>;

    /// Retrieve account by username.
    ///
    /// # Arguments
    /// * `username` - Username to search for
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Account>, AccountError>;

    /// Retrieve all accounts ordered by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;
}
