use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::errors::PasswordPolicyError;
use crate::account::errors::RoleError;
use crate::account::errors::UsernameError;
use crate::domain::session::models::Session;

/// Special characters accepted by the password policy and the strength check.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()-_=+[]{};:'\",.<>?/";

/// Account aggregate entity.
///
/// Username is the immutable key. Accounts are never deleted.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Username value type
///
/// Ensures username is at least 3 characters and contains only letters, digits and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;

    /// Create a new valid username.
    ///
    /// # Arguments
    /// * `username` - Raw username string
    ///
    /// # Returns
    /// Validated Username value object
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `InvalidCharacters` - Contains anything other than letters, digits and `_`
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username.chars().all(|c| c.is_alphanumeric() || c == '_') {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfied the registration policy.
///
/// Only lives long enough to be hashed; `Debug` never prints it.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// Validate a plaintext password against the registration policy.
    ///
    /// Checks run in order and the first failure is reported: length,
    /// uppercase, lowercase, digit, special character.
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if !password.chars().any(char::is_uppercase) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !password.chars().any(char::is_lowercase) {
            return Err(PasswordPolicyError::MissingLowercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }
        if !password.chars().any(is_special_character) {
            return Err(PasswordPolicyError::MissingSpecialCharacter);
        }

        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

fn is_special_character(c: char) -> bool {
    SPECIAL_CHARACTERS.contains(c)
}

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Analyst,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Analyst => "analyst",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "analyst" => Ok(Role::Analyst),
            "admin" => Ok(Role::Admin),
            _ => Err(RoleError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory password strength. Never used to reject a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    /// Score a password out of four checks: length of at least 8, both letter
    /// cases, a digit, a special character.
    ///
    /// 0-1 passing checks is Weak and 2 is Medium. 3-4 is Strong, but only
    /// when one of the passing checks is the special character; without it
    /// the password stays Medium.
    pub fn assess(password: &str) -> Self {
        let has_special = password.chars().any(is_special_character);
        let checks = [
            password.chars().count() >= 8,
            password.chars().any(char::is_uppercase) && password.chars().any(char::is_lowercase),
            password.chars().any(|c| c.is_ascii_digit()),
            has_special,
        ];

        match checks.iter().filter(|passed| **passed).count() {
            0 | 1 => PasswordStrength::Weak,
            2 => PasswordStrength::Medium,
            _ if has_special => PasswordStrength::Strong,
            _ => PasswordStrength::Medium,
        }
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub password: Password,
    pub role: Role,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `password` - Policy-checked plaintext password (hashed by the service)
    /// * `role` - Role granted to the account
    pub fn new(username: Username, password: Password, role: Role) -> Self {
        Self {
            username,
            password,
            role,
        }
    }

    /// Validate raw registration input.
    ///
    /// Username is checked before password, matching the order errors are reported in.
    pub fn parse(
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Result<Self, AccountError> {
        let username = Username::new(username.into())?;
        let password = Password::new(password.into())?;
        Ok(Self::new(username, password, role))
    }
}

/// Successful login result.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session: Session,
    pub role: Role,
}

/// A credential entry read from the legacy users file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedCredential {
    pub username: Username,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_valid() {
        assert!(Username::new("alice".to_string()).is_ok());
        assert!(Username::new("bob_42".to_string()).is_ok());
        assert!(Username::new("___".to_string()).is_ok());
    }

    #[test]
    fn test_username_too_short() {
        assert_eq!(
            Username::new("al".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
    }

    #[test]
    fn test_username_invalid_characters() {
        assert_eq!(
            Username::new("alice-smith".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
        assert_eq!(
            Username::new("alice smith".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_password_policy_order() {
        assert_eq!(
            Password::new("Ab1!".to_string()).unwrap_err(),
            PasswordPolicyError::TooShort { min: 8 }
        );
        assert_eq!(
            Password::new("abcdefg1!".to_string()).unwrap_err(),
            PasswordPolicyError::MissingUppercase
        );
        assert_eq!(
            Password::new("ABCDEFG1!".to_string()).unwrap_err(),
            PasswordPolicyError::MissingLowercase
        );
        assert_eq!(
            Password::new("Abcdefgh!".to_string()).unwrap_err(),
            PasswordPolicyError::MissingDigit
        );
        assert_eq!(
            Password::new("Abcdefg12".to_string()).unwrap_err(),
            PasswordPolicyError::MissingSpecialCharacter
        );
        assert!(Password::new("Str0ng!Pass".to_string()).is_ok());
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("Str0ng!Pass".to_string()).unwrap();
        assert_eq!(format!("{:?}", password), "Password(***)");
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert_eq!("Analyst".parse::<Role>(), Ok(Role::Analyst));
        assert_eq!(" admin ".parse::<Role>(), Ok(Role::Admin));
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::User);
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(PasswordStrength::assess("abc"), PasswordStrength::Weak);
        assert_eq!(PasswordStrength::assess(""), PasswordStrength::Weak);
        assert_eq!(PasswordStrength::assess("abcdefgh"), PasswordStrength::Weak);
        assert_eq!(PasswordStrength::assess("abcdefg1"), PasswordStrength::Medium);
        assert_eq!(PasswordStrength::assess("Abcdef12"), PasswordStrength::Medium);
        assert_eq!(PasswordStrength::assess("Abcdef1!"), PasswordStrength::Strong);
        assert_eq!(PasswordStrength::assess("Ab1!"), PasswordStrength::Strong);
    }
}
