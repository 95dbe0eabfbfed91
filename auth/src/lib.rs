//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (Argon2id, with read-only support for legacy bcrypt hashes)
//! - Opaque session token generation
//! - Authentication coordination
//!
//! Services define their own storage and account rules and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("my_password", "not a hash"));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenGenerator;
//!
//! let token = TokenGenerator::new().generate().unwrap();
//! assert_eq!(token.len(), 64);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new();
//!
//! // Register: hash password
//! let hash = auth.hash_password("Str0ng!Pass").unwrap();
//!
//! // Login: verify and issue a token
//! let result = auth.authenticate("Str0ng!Pass", &hash).unwrap();
//! println!("Token: {}", result.access_token);
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenError;
pub use token::TokenGenerator;
