//! Deterministic SHA-256 digests.
//!
//! - `sha256_hex(..)` hashes raw bytes.
//! - `sha256_canonical(..)` hashes the canonical JSON form of a value, so two
//!   inputs that differ only in key order or whitespace share a digest.
//! - Hex digests are **lowercase**.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes_of;
use crate::IoResult;

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Lowercase hex SHA-256 of the canonical JSON of `value`.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    let bytes = to_canonical_bytes_of(value)?;
    Ok(sha256_hex(&bytes))
}
