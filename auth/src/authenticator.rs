use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenError;
use crate::token::TokenGenerator;

/// Authentication coordinator combining password verification and session token generation.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and opaque token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_generator: TokenGenerator,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Opaque session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator issuing 256-bit session tokens.
    pub fn new() -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_generator: TokenGenerator::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Hashed password string
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match, or the stored hash is unreadable
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_generator.generate()?;

        Ok(AuthenticationResult { access_token })
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new()
    }
}
