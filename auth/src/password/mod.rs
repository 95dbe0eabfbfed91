pub mod argon2;
pub mod errors;
mod legacy;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;
