// crates/pz_cli/src/args.rs
//
// Offline CLI argument surface.
// - No networked paths (reject any scheme:// like http/https/file)
// - --input is the event snapshot (catalog + votes); --params is optional
// - Flag overrides win over the params file
// - --validate-only performs load + validation without computing an order

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use pz_core::EngineParams;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "pizza-order",
    disable_help_subcommand = true,
    about = "Turn ranked pizza votes into a pizza order"
)]
pub struct Args {
    /// Event snapshot JSON (catalog + votes).
    #[arg(long)]
    pub input: PathBuf,

    /// Engine params JSON; missing fields use defaults.
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Output directory for report.json (and report.html).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Extra renderer(s) besides report.json.
    #[arg(long, value_parser = ["json", "html"], num_args = 0..=2)]
    pub render: Vec<String>,

    /// Override: slice capacity of one pizza.
    #[arg(long)]
    pub slices_per_pizza: Option<u32>,

    /// Override: minimum demand for an option to stay in the running.
    #[arg(long)]
    pub min_viable: Option<u32>,

    /// Override: remainder slices needed to round up to another pizza.
    #[arg(long)]
    pub round_up: Option<u32>,

    /// Override: reallocation pass cap.
    #[arg(long)]
    pub max_passes: Option<u32>,

    /// Override: largest slice count a single vote may carry.
    #[arg(long)]
    pub max_slice_count: Option<u32>,

    /// Validate inputs only; do not compute an order.
    #[arg(long)]
    pub validate_only: bool,

    /// Suppress the order summary on stdout.
    #[arg(long)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG wins when set.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Apply flag overrides on top of `base`.
    pub fn apply_overrides(&self, mut base: EngineParams) -> EngineParams {
        if let Some(v) = self.slices_per_pizza {
            base.slices_per_pizza = v;
        }
        if let Some(v) = self.min_viable {
            base.min_viable_slices = v;
        }
        if let Some(v) = self.round_up {
            base.round_up_remainder = v;
        }
        if let Some(v) = self.max_passes {
            base.max_passes = v;
        }
        if let Some(v) = self.max_slice_count {
            base.max_slice_count = v;
        }
        base
    }
}

/// Errors surfaced by argument validation.
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

fn validate(mut args: Args) -> Result<Args, CliError> {
    ensure_local_path(&args.out)?;
    ensure_local_exists(&args.input, "--input")?;
    if let Some(p) = &args.params {
        ensure_local_exists(p, "--params")?;
    }
    args.input = normalize_path(&args.input);
    args.params = args.params.take().map(|p| normalize_path(&p));
    args.out = normalize_path(&args.out);
    Ok(args)
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

/// Ensure a path is local (no scheme) and exists as a regular file.
fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Best-effort normalization to an absolute path.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}
