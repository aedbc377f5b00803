//! Content fingerprinting for cache-busting filenames.
//!
//! A fingerprint is a prefix of the SHA-256 digest of a source file's exact
//! bytes, rendered as lowercase hex. It is content-based rather than
//! mtime-based, so a fresh checkout of unchanged sources reproduces the same
//! filenames and browsers keep their cached copies across deploys.
//!
//! The token is always derived from the *declared source* file, never from
//! rendered output: `style.scss` and the CSS compiled from it share one
//! identity, and a compiler upgrade that changes whitespace does not churn
//! every fingerprinted URL.

use sha2::{Digest, Sha256};
use std::io;
use std::path::Path;

/// Number of hex characters kept from the digest.
pub const TOKEN_LEN: usize = 16;

/// Fingerprint token for a byte slice.
pub fn token_for_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex = format!("{:x}", digest);
    hex.truncate(TOKEN_LEN);
    hex
}

/// Fingerprint token for the contents of `path`.
///
/// Fails with the underlying I/O error if the file cannot be read.
pub async fn fingerprint(path: &Path) -> io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(token_for_bytes(&bytes))
}
