//! Content keys for cached assets and startup log files
//!
//! A key is the first 16 bytes of the SHA-256 of the input text, hex
//! encoded (32 characters). Keys are embedded in directory names and in
//! generated shell text, so the algorithm must never change for an
//! existing staging directory.

use sha2::{Digest, Sha256};

/// Number of digest bytes kept in a content key
const KEY_BYTES: usize = 16;

/// Compute the content key for a URL or command string
pub fn content_key(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let result = hasher.finalize();

    hex::encode(&result[..KEY_BYTES])
}
