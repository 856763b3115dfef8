use sha2::{Digest, Sha256};

/// Hash token for comparison (SHA-256 hex).
/// Only the digest of the configured API token is kept in memory.
pub fn hash_access_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let out = hasher.finalize();
    hex::encode(out)
}

/// Compares a presented bearer token against the stored digest.
pub fn token_matches(presented: &str, expected_hash: &str) -> bool {
    let presented_hash = hash_access_token(presented);
    // fixed-length hex digests, fold every byte
    presented_hash.len() == expected_hash.len()
        && presented_hash
            .bytes()
            .zip(expected_hash.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
