//! Printable HTML page for the admin: order table, dropped demand, voter
//! breakdown, totals. Deterministic, offline, no external assets.

use std::fmt::{self, Write as _};

use crate::{Report, ReportError};

const STYLE: &str = "body{font-family:sans-serif;margin:2em}table{border-collapse:collapse}\
td,th{border:1px solid #999;padding:4px 8px;text-align:left}td.n{text-align:right}\
@media print{.noprint{display:none}}";

pub fn render_html(report: &Report) -> Result<String, ReportError> {
    let mut out = String::with_capacity(4096);
    write_page(report, &mut out).map_err(|e| ReportError::Render(e.to_string()))?;
    Ok(out)
}

fn write_page(r: &Report, out: &mut String) -> fmt::Result {
    let title = if r.event.title.is_empty() { "Pizza order" } else { r.event.title.as_str() };

    writeln!(out, "<!doctype html><html><head><meta charset=\"utf-8\"><title>{}</title>", esc(title))?;
    writeln!(out, "<style>{STYLE}</style></head><body>")?;
    writeln!(out, "<h1>{}</h1>", esc(title))?;

    // Order
    writeln!(out, "<h2>Order</h2>")?;
    if r.orders.is_empty() {
        writeln!(out, "<p>Nothing to order.</p>")?;
    } else {
        writeln!(out, "<table><tr><th>Pizza</th><th>Quantity</th><th>Slices requested</th></tr>")?;
        for o in &r.orders {
            writeln!(
                out,
                "<tr><td>{}</td><td class=\"n\">{}</td><td class=\"n\">{}</td></tr>",
                esc(&o.pizza_name),
                o.quantity,
                o.slices_requested
            )?;
        }
        writeln!(out, "</table>")?;
    }

    // Dropped
    if !r.dropped.is_empty() {
        writeln!(out, "<h2>Not ordered</h2><ul>")?;
        for d in &r.dropped {
            writeln!(out, "<li>{}</li>", esc(d.message()))?;
        }
        writeln!(out, "</ul>")?;
    }

    // Totals
    let s = &r.summary;
    writeln!(
        out,
        "<h2>Totals</h2><p>Voters: {} | Slices requested: {} | Pizzas: {} | Slices ordered: {}</p>",
        s.total_voters, s.total_slices_requested, s.total_pizzas, s.total_slices_ordered
    )?;

    // Voters
    writeln!(out, "<h2>Votes</h2>")?;
    writeln!(out, "<table><tr><th>Voter</th><th>Slices</th><th>Ranking</th><th>Allocated to</th></tr>")?;
    for v in &r.voters {
        let ranking = v
            .choices
            .iter()
            .map(|c| format!("{}. {}", c.priority, esc(&c.pizza_name)))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "<tr><td>{}</td><td class=\"n\">{}</td><td>{}</td><td>{}</td></tr>",
            esc(&v.voter_name),
            v.slice_count,
            ranking,
            esc(&v.allocated_to)
        )?;
    }
    writeln!(out, "</table>")?;

    if let Some(i) = &r.integrity {
        writeln!(
            out,
            "<p class=\"noprint\"><small>Input sha256 {} · {} {}</small></p>",
            esc(&i.input_sha256),
            esc(&i.engine_name),
            esc(&i.engine_version)
        )?;
    }

    writeln!(out, "</body></html>")
}

/// Escape text for HTML (minimal, deterministic).
fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
