//! Secret comparison helpers for header-gated admin endpoints.

use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compares a presented secret against the configured one.
///
/// Both values are hashed before comparison so the equality check does not
/// leak the position of the first mismatching byte.
pub fn secrets_match(presented: &str, expected: &str) -> bool {
    if expected.is_empty() {
        return false;
    }
    sha256_hex(presented) == sha256_hex(expected)
}
