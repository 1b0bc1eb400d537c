//! Whole-file parsing.
//!
//! Walks the lines of a todo file in order, tracking the current category
//! header, and hands every content line to the [line classifier].
//!
//! [line classifier]: crate::grammar::classify_line

use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, trace, warn};

use crate::grammar::{classify_line, LineContext, ParseError};
use crate::policy::FilterPolicy;
use crate::record::TaskRecord;

/// Settings that apply to a whole parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext {
    /// The date "days away" is measured from.
    pub today: NaiveDate,
}

impl ParseContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// A context anchored on the local calendar date.
    pub fn local() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

/// A content line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: usize,
    /// Why the line was rejected.
    pub error: ParseError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Syntax error at line {}", self.line)
    }
}

/// Result of parsing a todo file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFile {
    /// Records in file order.
    pub records: Vec<TaskRecord>,
    /// One entry per unparseable content line, in file order.
    pub diagnostics: Vec<Diagnostic>,
    /// Category header names in first-seen order, without duplicates.
    pub categories: Vec<String>,
}

/// What a single line of the file is.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LineClass<'a> {
    Skip,
    Header(&'a str),
    Content(&'a str),
}

pub(crate) fn classify(raw: &str) -> LineClass<'_> {
    let line = raw.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() || line.starts_with('#') {
        LineClass::Skip
    } else if let Some(rest) = line.strip_prefix('[') {
        LineClass::Header(rest.strip_suffix(']').unwrap_or(rest))
    } else {
        LineClass::Content(line)
    }
}

/// Parses every line of a todo file, keeping all valid records.
///
/// Blank lines and `#` comments are skipped. A line starting with `[` sets the
/// category for every following item until the next header. Any other line
/// is classified as an item; failures become [`Diagnostic`]s and parsing
/// continues with the next line.
pub fn parse_lines<'a, I>(lines: I, ctx: &ParseContext) -> ParsedFile
where
    I: IntoIterator<Item = &'a str>,
{
    parse_with(lines, ctx, |_| true)
}

/// Like [`parse_lines`], but only keeps records the policy includes.
pub fn parse_and_filter<'a, I>(
    lines: I,
    ctx: &ParseContext,
    policy: &FilterPolicy,
) -> ParsedFile
where
    I: IntoIterator<Item = &'a str>,
{
    parse_with(lines, ctx, |record| policy.includes(record))
}

fn parse_with<'a, I, F>(lines: I, ctx: &ParseContext, keep: F) -> ParsedFile
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&TaskRecord) -> bool,
{
    let mut parsed = ParsedFile::default();
    let mut category: Option<&str> = None;

    for (index, raw) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        match classify(raw) {
            LineClass::Skip => {}
            LineClass::Header(name) => {
                debug!(line = line_number, category = name, "category header");
                if !parsed.categories.iter().any(|c| c == name) {
                    parsed.categories.push(name.to_string());
                }
                category = Some(name);
            }
            LineClass::Content(line) => {
                let line_ctx = LineContext::new(line_number, category, ctx.today);
                match classify_line(line, &line_ctx) {
                    Ok(record) => {
                        trace!(line = line_number, kind = %record.kind(), "parsed item");
                        if keep(&record) {
                            parsed.records.push(record);
                        } else {
                            debug!(line = line_number, "item filtered out");
                        }
                    }
                    Err(error) => {
                        warn!(line = line_number, %error, "syntax error");
                        parsed.diagnostics.push(Diagnostic {
                            line: line_number,
                            error,
                        });
                    }
                }
            }
        }
    }

    parsed
}
