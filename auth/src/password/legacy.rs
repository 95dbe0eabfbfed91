//! Verification of bcrypt hashes written by the legacy credentials file.
//!
//! New hashes are always Argon2id; bcrypt is only ever verified.

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

pub(crate) fn is_bcrypt_hash(hash: &str) -> bool {
    BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix))
}

pub(crate) fn verify_bcrypt(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored bcrypt hash is malformed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_bcrypt_hash() {
        assert!(is_bcrypt_hash(
            "$2b$12$KIXQJ0Zr3yq1f1cV8M7GkOeXJ6l3y3m5tq2m9i1U1V0a0b1c2d3e4"
        ));
        assert!(is_bcrypt_hash("$2y$10$abc"));
        assert!(!is_bcrypt_hash("$argon2id$v=19$m=19456,t=2,p=1$abc$def"));
        assert!(!is_bcrypt_hash("plaintext"));
    }

    #[test]
    fn test_verify_malformed_bcrypt_is_false() {
        assert!(!verify_bcrypt("password", "$2b$12$tooshort"));
    }
}
