//! pz_pipeline: deterministic pipeline surface (validate → reallocate → quantize → assemble).
//!
//! This crate does no I/O of its own; `pz_io` loads inputs and the CLI writes
//! outputs. `load_and_run` is a convenience for callers that start from a path.

#![forbid(unsafe_code)]

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, info_span};

use pz_algo::{reallocate, AllocError, CatalogIndex, WaterfallLog};
use pz_core::{EngineParams, EventBallots};
use pz_report::{assemble, Integrity, Report, ReportError};

pub mod validate;

pub use validate::{validate, EntityRef, Severity, ValidationIssue, ValidationReport};

/// Engine identifiers echoed into the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineMeta {
    pub name: String,
    pub version: String,
}

impl Default for EngineMeta {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Pipeline context: one immutable snapshot of votes + catalog.
#[derive(Debug, Clone)]
pub struct PipelineCtx {
    pub ballots: EventBallots,
    pub params: EngineParams,
    /// Digest of the input as loaded; `None` for in-memory callers.
    pub input_sha256: Option<String>,
    pub engine_meta: EngineMeta,
}

impl PipelineCtx {
    pub fn new(ballots: EventBallots, params: EngineParams) -> Self {
        Self { ballots, params, input_sha256: None, engine_meta: EngineMeta::default() }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutputs {
    pub report: Report,
    /// Warnings only; errors abort the run.
    pub validation: ValidationReport,
    pub waterfall_log: WaterfallLog,
}

/// Single error surface for the pipeline orchestration.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("io: {0}")]
    Io(#[from] pz_io::IoError),
    #[error("validation failed: {}", summarize(.0))]
    Validate(ValidationReport),
    #[error("params: {0}")]
    Params(String),
    #[error("allocate: {0}")]
    Allocate(#[from] AllocError),
    #[error("report: {0}")]
    Report(#[from] ReportError),
}

fn summarize(r: &ValidationReport) -> String {
    let msgs: Vec<String> = r
        .errors()
        .map(|i| format!("{} ({:?}): {}", i.code, i.where_, i.message))
        .collect();
    msgs.join("; ")
}

/// Run the full pipeline over an in-memory snapshot.
pub fn run(ctx: PipelineCtx) -> Result<PipelineOutputs, PipelineError> {
    let span = info_span!("pizza_report", event = %ctx.ballots.event.event_id);
    let _enter = span.enter();

    // Input validation reads the slice and choice bounds, so params go first.
    ctx.params.validate().map_err(|e| PipelineError::Params(e.to_string()))?;

    let validation = validate(&ctx.ballots, &ctx.params);
    for issue in &validation.issues {
        debug!(code = issue.code, severity = ?issue.severity, "{}", issue.message);
    }
    if !validation.pass {
        return Err(PipelineError::Validate(validation));
    }

    let index = CatalogIndex::build(&ctx.ballots.catalog)?;
    let outcome = reallocate(&index, &ctx.ballots.votes, &ctx.params)?;
    let mut report = assemble(&ctx.ballots.event, &index, &ctx.ballots.votes, &outcome, &ctx.params)?;

    if let Some(sha) = ctx.input_sha256 {
        report.integrity = Some(Integrity {
            input_sha256: sha,
            params: ctx.params,
            engine_name: ctx.engine_meta.name,
            engine_version: ctx.engine_meta.version,
        });
    }

    info!(
        voters = report.summary.total_voters,
        slices_requested = report.summary.total_slices_requested,
        pizzas = report.summary.total_pizzas,
        dropped = report.dropped.len(),
        passes = outcome.passes,
        "order computed"
    );

    Ok(PipelineOutputs { report, validation, waterfall_log: outcome.log })
}

/// Load the event snapshot from `path` and run the pipeline on it.
pub fn load_and_run(path: &Path, params: EngineParams, engine_meta: EngineMeta) -> Result<PipelineOutputs, PipelineError> {
    let loaded = pz_io::loader::load_event_from_path(path)?;
    run(PipelineCtx {
        ballots: loaded.ballots,
        params,
        input_sha256: Some(loaded.input_sha256),
        engine_meta,
    })
}
