//! SHA-256 content fingerprints.
//!
//! Used to fingerprint written preprocessor artifacts so a run's logs record
//! exactly which artifact bytes it produced.

use sha2::{Digest, Sha256};
use std::io;
use std::path::Path;

/// Compute the SHA-256 hash of a file's contents as a lowercase hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let content = std::fs::read(path)?;
    Ok(hash_bytes(&content))
}

/// Compute the SHA-256 hash of arbitrary bytes as a lowercase hex string.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
