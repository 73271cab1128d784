//! CSV emitter.
//!
//! One row per (object, field) pair, in report iteration order. Fields
//! containing a delimiter, quote, or newline are quoted with doubled
//! interior quotes.

use fg_common::UsageReport;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::Result;

const HEADERS: [&str; 6] = ["Object", "Field", "Longest", "Shortest", "Count", "Type Info"];

/// Render the report as a CSV document.
pub fn render_csv(report: &UsageReport) -> String {
    let mut out = String::new();
    out.push_str(&HEADERS.join(","));
    out.push('\n');

    for (object, fields) in report {
        for (field, stat) in fields {
            let row = [
                escape(object),
                escape(field),
                stat.longest.to_string(),
                stat.shortest.to_string(),
                stat.count.to_string(),
                escape(&stat.type_info),
            ];
            out.push_str(&row.join(","));
            out.push('\n');
        }
    }

    out
}

/// Render the report and write it to `path`.
pub fn write_csv(report: &UsageReport, path: &Path) -> Result<()> {
    let document = render_csv(report);
    fs::write(path, &document)?;
    info!(path = %path.display(), bytes = document.len(), "wrote CSV report");
    Ok(())
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
