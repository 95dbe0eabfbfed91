use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::ImportedCredential;
use crate::account::models::LoginOutcome;
use crate::account::models::PasswordStrength;
use crate::account::models::RegisterCommand;
use crate::account::models::Role;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::domain::lockout::models::LockStatus;
use crate::domain::lockout::models::LockoutPolicy;
use crate::domain::lockout::ports::LockoutRepository;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionRepository;

/// Domain service implementation for account authentication.
///
/// Concrete implementation of AccountServicePort with dependency injection.
/// Storage handles are passed in at construction; the service holds no
/// other shared state.
pub struct AccountService<AR, LR, SR>
where
    AR: AccountRepository,
    LR: LockoutRepository,
    SR: SessionRepository,
{
    accounts: Arc<AR>,
    lockouts: Arc<LR>,
    sessions: Arc<SR>,
    authenticator: auth::Authenticator,
    lockout_policy: LockoutPolicy,
    session_ttl: Duration,
}

impl<AR, LR, SR> AccountService<AR, LR, SR>
where
    AR: AccountRepository,
    LR: LockoutRepository,
    SR: SessionRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// Uses the default lockout policy (3 failures, 300 seconds) and a
    /// 24 hour session lifetime.
    ///
    /// # Arguments
    /// * `accounts` - Account persistence implementation
    /// * `lockouts` - Failed-login counter persistence implementation
    /// * `sessions` - Session persistence implementation
    ///
    /// # Returns
    /// Configured account service instance
    pub fn new(accounts: Arc<AR>, lockouts: Arc<LR>, sessions: Arc<SR>) -> Self {
        Self {
            accounts,
            lockouts,
            sessions,
            authenticator: auth::Authenticator::new(),
            lockout_policy: LockoutPolicy::default(),
            session_ttl: Duration::hours(24),
        }
    }

    /// Replace the lockout policy.
    pub fn with_lockout_policy(mut self, lockout_policy: LockoutPolicy) -> Self {
        self.lockout_policy = lockout_policy;
        self
    }

    /// Replace the session lifetime.
    pub fn with_session_ttl(mut self, session_ttl: Duration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    async fn lock_status_at(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<LockStatus, AccountError> {
        let Some(record) = self.lockouts.find(username).await? else {
            return Ok(LockStatus::Unlocked);
        };

        if let Some(cleared) = self.lockout_policy.maybe_unlock(&record, now) {
            self.lockouts.reset(username).await?;
            tracing::info!(username = %username, "Lockout window elapsed, account unlocked");
            return Ok(self.lockout_policy.status(&cleared, now));
        }

        Ok(self.lockout_policy.status(&record, now))
    }

    /// Count a failed login and pick the error to report.
    ///
    /// The failure that reaches the limit is reported as `AccountLocked`.
    async fn reject_login(
        &self,
        username: &str,
        now: DateTime<Utc>,
        failure: AccountError,
    ) -> AccountError {
        let record = match self.lockouts.record_failure(username, now).await {
            Ok(record) => record,
            Err(e) => return e,
        };

        match self.lockout_policy.status(&record, now) {
            LockStatus::Locked { remaining_seconds } => {
                tracing::warn!(
                    username = %username,
                    failed_attempts = record.failed_attempts,
                    remaining_seconds,
                    "Account locked after repeated login failures"
                );
                AccountError::AccountLocked { remaining_seconds }
            }
            LockStatus::Unlocked => {
                tracing::info!(
                    username = %username,
                    failed_attempts = record.failed_attempts,
                    reason = %failure,
                    "Login failed"
                );
                failure
            }
        }
    }
}

#[async_trait]
impl<AR, LR, SR> AccountServicePort for AccountService<AR, LR, SR>
where
    AR: AccountRepository,
    LR: LockoutRepository,
    SR: SessionRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())
            .map_err(|e| AccountError::PasswordHashing(e.to_string()))?;

        let account = Account {
            username: command.username,
            password_hash,
            role: command.role,
            created_at: Utc::now(),
        };

        let created = self.accounts.create(account).await?;

        tracing::info!(
            username = %created.username,
            role = %created.role,
            "Account registered"
        );

        Ok(created)
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AccountError> {
        let now = Utc::now();

        // Attempts against a locked account are not counted.
        if let LockStatus::Locked { remaining_seconds } = self.lock_status_at(username, now).await?
        {
            tracing::warn!(
                username = %username,
                remaining_seconds,
                "Login rejected, account locked"
            );
            return Err(AccountError::AccountLocked { remaining_seconds });
        }

        // A malformed username cannot belong to an account.
        let account = match Username::new(username.to_string()) {
            Ok(valid) => self.accounts.find_by_username(&valid).await?,
            Err(_) => None,
        };

        let Some(account) = account else {
            let failure = AccountError::NotFound(username.to_string());
            return Err(self.reject_login(username, now, failure).await);
        };

        let authenticated = match self
            .authenticator
            .authenticate(password, &account.password_hash)
        {
            Ok(authenticated) => authenticated,
            Err(auth::AuthenticationError::InvalidCredentials) => {
                return Err(self
                    .reject_login(username, now, AccountError::WrongPassword)
                    .await);
            }
            Err(auth::AuthenticationError::TokenError(e)) => {
                return Err(AccountError::TokenGeneration(e.to_string()));
            }
        };

        self.lockouts.reset(username).await?;

        let purged = self.sessions.delete_expired(now).await?;
        if purged > 0 {
            tracing::debug!(purged, "Expired sessions removed");
        }

        let session = self
            .sessions
            .create(Session::new(
                authenticated.access_token,
                account.username.as_str(),
                now,
                self.session_ttl,
            ))
            .await?;

        tracing::info!(
            username = %account.username,
            role = %account.role,
            expires_at = %session.expires_at,
            "Login successful"
        );

        Ok(LoginOutcome {
            session,
            role: account.role,
        })
    }

    async fn check_locked(&self, username: &str) -> Result<LockStatus, AccountError> {
        self.lock_status_at(username, Utc::now()).await
    }

    fn check_password_strength(&self, password: &str) -> PasswordStrength {
        PasswordStrength::assess(password)
    }

    async fn validate_session(&self, token: &str) -> Result<Session, AccountError> {
        let session = self
            .sessions
            .find(token)
            .await?
            .ok_or(AccountError::InvalidSession)?;

        if session.is_expired(Utc::now()) {
            self.sessions.delete(token).await?;
            tracing::debug!(username = %session.username, "Expired session rejected");
            return Err(AccountError::InvalidSession);
        }

        Ok(session)
    }

    async fn logout(&self, token: &str) -> Result<(), AccountError> {
        if !self.sessions.delete(token).await? {
            return Err(AccountError::InvalidSession);
        }

        tracing::info!("Session revoked");
        Ok(())
    }

    async fn get_account(&self, username: &Username) -> Result<Account, AccountError> {
        self.accounts
            .find_by_username(username)
            .await?
            .ok_or(AccountError::NotFound(username.to_string()))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.accounts.list_all().await
    }

    async fn import_credentials(
        &self,
        credentials: Vec<ImportedCredential>,
    ) -> Result<usize, AccountError> {
        let mut imported = 0;

        for credential in credentials {
            let username = credential.username.clone();
            let account = Account {
                username: credential.username,
                password_hash: credential.password_hash,
                role: Role::User,
                created_at: Utc::now(),
            };

            if self.accounts.create_if_absent(account).await? {
                imported += 1;
            } else {
                tracing::debug!(username = %username, "Skipped import, username exists");
            }
        }

        Ok(imported)
    }
}
