//! Loader: read local JSON inputs (event snapshot, engine params) and return
//! typed values for the pipeline. No network I/O.
//!
//! Structural checks on votes (priorities, slice bounds, references) are the
//! pipeline's VALIDATE stage; this module only guarantees well-formed JSON
//! and well-formed tokens.

use std::fs;
use std::path::{Path, PathBuf};

use pz_core::{EngineParams, EventBallots};
use tracing::debug;

use crate::hasher::sha256_canonical;
use crate::{IoError, IoResult};

/// Inputs larger than this are rejected before parsing.
pub const MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

/// Event snapshot plus its provenance.
#[derive(Debug, Clone)]
pub struct LoadedEvent {
    pub ballots: EventBallots,
    pub source: PathBuf,
    /// SHA-256 over the canonical JSON of the parsed snapshot.
    pub input_sha256: String,
}

pub fn load_event_from_path(path: &Path) -> IoResult<LoadedEvent> {
    let text = read_bounded(path)?;
    let ballots = parse_event(&text)?;
    let input_sha256 = sha256_canonical(&ballots)?;
    debug!(
        path = %path.display(),
        catalog = ballots.catalog.len(),
        votes = ballots.votes.len(),
        sha256 = %input_sha256,
        "event snapshot loaded"
    );
    Ok(LoadedEvent { ballots, source: path.to_path_buf(), input_sha256 })
}

pub fn parse_event(text: &str) -> IoResult<EventBallots> {
    Ok(serde_json::from_str(text)?)
}

/// Load engine params; missing fields take their defaults.
pub fn load_params_from_path(path: &Path) -> IoResult<EngineParams> {
    let text = read_bounded(path)?;
    let params: EngineParams = serde_json::from_str(&text)?;
    params.validate()?;
    Ok(params)
}

fn read_bounded(path: &Path) -> IoResult<String> {
    let meta = fs::metadata(path)
        .map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    if meta.len() > MAX_INPUT_BYTES {
        return Err(IoError::Invalid(format!(
            "{}: {} bytes exceeds limit of {MAX_INPUT_BYTES}",
            path.display(),
            meta.len()
        )));
    }
    fs::read_to_string(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))
}
