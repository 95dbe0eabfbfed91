use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::TokenError;

/// Opaque session token generator.
///
/// Tokens carry no claims; they are random bytes from the operating system
/// CSPRNG, hex encoded. Whoever stores them owns their meaning.
pub struct TokenGenerator {
    byte_length: usize,
}

impl TokenGenerator {
    /// Default token size: 32 bytes, 256 bits of entropy.
    pub const DEFAULT_BYTE_LENGTH: usize = 32;

    /// Smallest accepted token size: 16 bytes, 128 bits of entropy.
    pub const MIN_BYTE_LENGTH: usize = 16;

    /// Create a generator producing 256-bit tokens.
    pub fn new() -> Self {
        Self {
            byte_length: Self::DEFAULT_BYTE_LENGTH,
        }
    }

    /// Create a generator with a custom token size.
    ///
    /// Sizes below 16 bytes are raised to 16 bytes.
    pub fn with_byte_length(byte_length: usize) -> Self {
        Self {
            byte_length: byte_length.max(Self::MIN_BYTE_LENGTH),
        }
    }

    /// Generate a new token.
    ///
    /// # Returns
    /// Lowercase hex string, two characters per random byte
    ///
    /// # Errors
    /// * `GenerationFailed` - The OS random source is unavailable
    pub fn generate(&self) -> Result<String, TokenError> {
        let mut bytes = vec![0u8; self.byte_length];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenError::GenerationFailed(e.to_string()))?;

        Ok(hex::encode(bytes))
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}
