// crates/pz_cli/src/main.rs
//
// Exit codes, typed error mapping, logging init, and the run path
// (load → params → pipeline → report.json → optional report.html → stdout summary).

mod args;

mod exitcodes {
    pub const OK: u8 = 0;
    pub const VALIDATION: u8 = 2;
    pub const IO: u8 = 4;
    pub const ENGINE: u8 = 5;
}

use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args};
use pz_core::EngineParams;
use pz_io::{canonical_json, loader, IoError};
use pz_pipeline::{EngineMeta, PipelineCtx, PipelineError, PipelineOutputs, Severity};
use pz_report::{render_html, render_json, Report, ReportError};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Malformed or invalid input / params.
    Validation(String),
    /// Read/write/path failures.
    Io(String),
    /// Engine invariant violations that slipped past validation.
    Engine(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Engine(m) => write!(f, "engine: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("pizza-order: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION);
        }
    };
    init_logging(args.verbose);

    let result = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    match result {
        Ok(()) => ExitCode::from(exitcodes::OK),
        Err(e) => {
            error!("{e}");
            eprintln!("pizza-order: error: {e}");
            ExitCode::from(map_error(&e))
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn map_error(e: &MainError) -> u8 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::Io(_) => exitcodes::IO,
        MainError::Engine(_) => exitcodes::ENGINE,
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Json { .. } | IoError::Invalid(_) => MainError::Validation(e.to_string()),
        IoError::Path(_) => MainError::Io(e.to_string()),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Io(io) => map_io_err(io),
        PipelineError::Validate(_) | PipelineError::Params(_) => MainError::Validation(e.to_string()),
        PipelineError::Allocate(_) => MainError::Engine(e.to_string()),
        PipelineError::Report(ReportError::Alloc(_)) => MainError::Engine(e.to_string()),
        PipelineError::Report(_) => MainError::Io(e.to_string()),
    }
}

fn load_params(args: &Args) -> Result<EngineParams, MainError> {
    let base = match &args.params {
        Some(p) => loader::load_params_from_path(p).map_err(map_io_err)?,
        None => EngineParams::default(),
    };
    let params = args.apply_overrides(base);
    params
        .validate()
        .map_err(|e| MainError::Validation(format!("params: {e}")))?;
    Ok(params)
}

/// Load + validate; no order is computed and nothing is written.
fn validate_only(args: &Args) -> Result<(), MainError> {
    let params = load_params(args)?;
    let loaded = loader::load_event_from_path(&args.input).map_err(map_io_err)?;
    let report = pz_pipeline::validate(&loaded.ballots, &params);

    for issue in &report.issues {
        let tag = match issue.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        eprintln!("{tag}: {} {:?}: {}", issue.code, issue.where_, issue.message);
    }
    if !report.pass {
        let n = report.errors().count();
        return Err(MainError::Validation(format!("{n} error(s) in {}", args.input.display())));
    }
    if !args.quiet {
        eprintln!("validate-only: inputs OK");
    }
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let params = load_params(args)?;
    let loaded = loader::load_event_from_path(&args.input).map_err(map_io_err)?;

    let ctx = PipelineCtx {
        ballots: loaded.ballots,
        params,
        input_sha256: Some(loaded.input_sha256),
        engine_meta: EngineMeta {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };
    let outs = pz_pipeline::run(ctx).map_err(map_pipeline_err)?;

    write_reports(args, &outs, &args.out)?;

    if !args.quiet {
        print!("{}", summary_text(&outs.report)?);
    }
    info!(out = %args.out.display(), "reports written");
    Ok(())
}

fn write_reports(args: &Args, outs: &PipelineOutputs, out_dir: &Path) -> Result<(), MainError> {
    fs::create_dir_all(out_dir).map_err(|e| MainError::Io(format!("mkdir {}: {e}", out_dir.display())))?;

    let json = render_json(&outs.report).map_err(|e| MainError::Io(e.to_string()))?;
    canonical_json::write_canonical_file(&out_dir.join("report.json"), &json)
        .map_err(|e| MainError::Io(format!("write report.json: {e}")))?;

    for fmt in &args.render {
        match fmt.as_str() {
            // report.json is always written above.
            "json" => {}
            "html" => {
                let html = render_html(&outs.report).map_err(|e| MainError::Io(e.to_string()))?;
                canonical_json::write_atomic(&out_dir.join("report.html"), html.as_bytes())
                    .map_err(|e| MainError::Io(format!("write report.html: {e}")))?;
            }
            other => return Err(MainError::Io(format!("unknown renderer: {other}"))),
        }
    }
    Ok(())
}

/// Plain-text order summary for the terminal.
fn summary_text(r: &Report) -> Result<String, MainError> {
    let mut s = String::new();
    write_summary(r, &mut s).map_err(|e| MainError::Io(format!("summary: {e}")))?;
    Ok(s)
}

fn write_summary(r: &Report, out: &mut String) -> fmt::Result {
    let title = if r.event.title.is_empty() { "event" } else { r.event.title.as_str() };
    writeln!(out, "Order for {title}:")?;
    if r.orders.is_empty() {
        writeln!(out, "  (nothing to order)")?;
    }
    for o in &r.orders {
        writeln!(out, "  {} x {} ({} slices requested)", o.quantity, o.pizza_name, o.slices_requested)?;
    }
    if !r.dropped.is_empty() {
        writeln!(out, "Not ordered:")?;
        for d in &r.dropped {
            writeln!(out, "  - {}", d.message())?;
        }
    }
    let t = &r.summary;
    writeln!(
        out,
        "Total: {} pizza(s) for {} voter(s), {} slices requested",
        t.total_pizzas, t.total_voters, t.total_slices_requested
    )
}
