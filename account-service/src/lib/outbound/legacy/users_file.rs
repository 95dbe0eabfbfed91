//! Reader for the legacy flat credentials file.
//!
//! One `username,password_hash` entry per line. Hashes are bcrypt strings
//! written by the previous implementation.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;

use crate::account::models::ImportedCredential;
use crate::account::models::Username;

/// Parse the file contents, skipping blank, malformed and invalid-username lines.
pub fn parse_users_file(contents: &str) -> Vec<ImportedCredential> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(index, line)| parse_line(index + 1, line))
        .collect()
}

fn parse_line(line_number: usize, line: &str) -> Option<ImportedCredential> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut parts = line.split(',');
    let (Some(username), Some(password_hash)) = (parts.next(), parts.next()) else {
        tracing::warn!(line = line_number, "Skipping legacy entry without a password hash");
        return None;
    };

    let password_hash = password_hash.trim();
    if password_hash.is_empty() {
        tracing::warn!(line = line_number, "Skipping legacy entry with an empty password hash");
        return None;
    }

    match Username::new(username.trim().to_string()) {
        Ok(username) => Some(ImportedCredential {
            username,
            password_hash: password_hash.to_string(),
        }),
        Err(e) => {
            tracing::warn!(line = line_number, error = %e, "Skipping legacy entry");
            None
        }
    }
}

/// Read and parse a legacy credentials file.
///
/// A missing file yields no entries.
pub async fn read_users_file(path: &Path) -> anyhow::Result<Vec<ImportedCredential>> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "Legacy users file not found, nothing to import");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to read legacy users file {}", path.display()))
        }
    };

    Ok(parse_users_file(&contents))
}
