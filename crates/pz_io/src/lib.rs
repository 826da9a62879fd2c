//! pz_io: single-source-of-truth I/O crate.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Loading of the event snapshot and engine params from local JSON files.
//! - Canonical JSON bytes + atomic writes; SHA-256 digests of inputs.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for pz_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, create_dir_all, rename, ...).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON serialization/deserialization errors with a location hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Loaded content violates a basic invariant (e.g. bad params).
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column rather than a pointer.
        let pointer = if e.line() > 0 {
            format!("line {} column {}", e.line(), e.column())
        } else {
            "/".to_string()
        };
        IoError::Json { pointer, msg: e.to_string() }
    }
}

impl From<pz_core::CoreError> for IoError {
    fn from(e: pz_core::CoreError) -> Self {
        IoError::Invalid(e.to_string())
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;
