//! Report JSON renderer.
//!
//! The value mirrors the `Report` model field-for-field. Object key order is
//! not significant here; writers that need stable bytes go through
//! `pz_io::canonical_json`.

use serde_json::Value;

use crate::{Report, ReportError};

pub fn render_json(report: &Report) -> Result<Value, ReportError> {
    Ok(serde_json::to_value(report)?)
}
