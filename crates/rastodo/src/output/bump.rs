//! Bump result formatting.

use std::path::Path;

use owo_colors::OwoColorize;
use rastodo_core::BumpOutcome;
use serde::Serialize;

/// JSON output structure for a bump.
#[derive(Serialize)]
pub struct BumpOutput<'a> {
    pub path: String,
    pub line: usize,
    pub old_date: String,
    pub new_date: String,
    pub updated_line: &'a str,
    pub written: bool,
}

/// Describes the change a bump makes, e.g. `line 2: 2014-06-10 -> 2014-06-24`
/// followed by the rewritten line.
pub fn format_bump_preview(outcome: &BumpOutcome, use_colors: bool) -> String {
    let old = outcome.old_date.format("%Y-%m-%d").to_string();
    let new = outcome.new_date.format("%Y-%m-%d").to_string();
    if use_colors {
        format!(
            "line {}: {} -> {}\n  {}",
            outcome.line,
            old.dimmed(),
            new.green(),
            outcome.updated_line
        )
    } else {
        format!(
            "line {}: {} -> {}\n  {}",
            outcome.line, old, new, outcome.updated_line
        )
    }
}

/// Formats a bump as JSON.
pub fn format_bump_json(
    outcome: &BumpOutcome,
    path: &Path,
    written: bool,
) -> serde_json::Result<String> {
    let output = BumpOutput {
        path: path.display().to_string(),
        line: outcome.line,
        old_date: outcome.old_date.format("%Y-%m-%d").to_string(),
        new_date: outcome.new_date.format("%Y-%m-%d").to_string(),
        updated_line: &outcome.updated_line,
        written,
    };
    serde_json::to_string_pretty(&output)
}
