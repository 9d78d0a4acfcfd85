//! Content digests for change tracking.
//!
//! A digest is the lowercase hex SHA-256 of a file's bytes, so it depends on
//! nothing but the content.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::Result;

/// Returns the hex-encoded SHA-256 of `bytes`.
pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Returns the hex-encoded SHA-256 of the file at `path`.
pub fn digest_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
