//! Content hashing for staleness detection.
//!
//! Digests are lowercase hex SHA-256. An empty string stands for "unknown"
//! and never equals a real digest.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Size of the read buffer used when hashing files.
const CHUNK_SIZE: usize = 4096;

/// Hash a file's bytes, reading it in fixed-size chunks.
///
/// Returns an empty string if the file does not exist or cannot be read.
pub fn hash_file(path: &Path) -> String {
    match try_hash_file(path) {
        Ok(digest) => digest,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                tracing::debug!("Could not hash {}: {}", path.display(), e);
            }
            String::new()
        }
    }
}

fn try_hash_file(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(&hasher.finalize()[..]))
}

/// Hash the UTF-8 bytes of a string.
pub fn hash_content(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    hex::encode(&digest[..])
}

/// Check whether a string looks like a digest produced by this module.
pub fn is_valid_digest(digest: &str) -> bool {
    digest.len() == DIGEST_HEX_LEN
        && digest
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
