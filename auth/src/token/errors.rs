use thiserror::Error;

/// Error type for session token operations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to generate token: {0}")]
    GenerationFailed(String),
}
