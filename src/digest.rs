//! Digest Module
//!
//! Maps message bytes to the lowercase hex SHA-256 digest used as a store key.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded digest in characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// Computes the lowercase hex SHA-256 digest of `message`.
///
/// Total and deterministic: equal inputs always produce equal digests.
pub fn digest(message: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(message.as_ref()))
}

/// Returns true if `candidate` looks like a digest produced by [`digest`].
pub fn is_digest(candidate: &str) -> bool {
    candidate.len() == DIGEST_HEX_LEN
        && candidate
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
