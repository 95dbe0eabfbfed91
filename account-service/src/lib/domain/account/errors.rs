use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must be at least {min} characters long (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Username can only contain letters, numbers, and underscores")]
    InvalidCharacters,
}

/// Error for password policy violations at registration time
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize },

    #[error("Password must include at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must include at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must include at least one number")]
    MissingDigit,

    #[error("Password must include at least one special character")]
    MissingSpecialCharacter,
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role '{0}' (expected user, analyst or admin)")]
    Unknown(String),
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Registration-time validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    // Login-time errors
    #[error("Username '{0}' not found")]
    NotFound(String),

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Account locked. Try again in {remaining_seconds} seconds")]
    AccountLocked { remaining_seconds: i64 },

    // Session errors
    #[error("Invalid or expired session")]
    InvalidSession,

    #[error("Insufficient role for this operation")]
    Forbidden,

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    #[error("Session token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AccountError {
    /// Whether the error is an infrastructure failure rather than an expected outcome.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AccountError::PasswordHashing(_)
                | AccountError::TokenGeneration(_)
                | AccountError::DatabaseError(_)
        )
    }
}
