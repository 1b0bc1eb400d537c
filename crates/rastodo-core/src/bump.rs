//! Moving a recurring item to its next due date.
//!
//! Bumping rewrites only the date token of one line; every other byte of the
//! file, line endings included, is kept.

use chrono::NaiveDate;
use thiserror::Error;

use crate::file::{classify, LineClass, ParseContext};
use crate::grammar::{classify_line, date_span, LineContext, ParseError};
use crate::record::TaskKind;

/// Errors from [`bump`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BumpError {
    /// The file has fewer lines than requested.
    #[error("line {line} does not exist (file has {total} lines)")]
    NoSuchLine { line: usize, total: usize },

    /// The line is blank, a comment or a category header.
    #[error("line {line} is not a todo item")]
    NotAnItem { line: usize },

    /// The line is an item of another type.
    #[error("line {line} is a '{kind}' item, only recurring items can be bumped")]
    NotRecurring { line: usize, kind: TaskKind },

    /// The line does not parse.
    #[error("line {line} cannot be parsed: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },
}

/// The rewritten file and what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    /// 1-based line number that was bumped.
    pub line: usize,
    pub old_date: NaiveDate,
    pub new_date: NaiveDate,
    /// The bumped line, without its line ending.
    pub updated_line: String,
    /// The whole file with the bumped line replaced.
    pub contents: String,
}

/// Replaces the due date of the recurring item on `line` with its next
/// occurrence.
///
/// # Errors
///
/// Returns [`BumpError::NoSuchLine`] for a line past the end of the file,
/// [`BumpError::NotAnItem`] for non-item lines, [`BumpError::Parse`] for a
/// line with a syntax error and [`BumpError::NotRecurring`] for other types.
pub fn bump(text: &str, line: usize, ctx: &ParseContext) -> Result<BumpOutcome, BumpError> {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let raw = line
        .checked_sub(1)
        .and_then(|index| lines.get(index))
        .ok_or(BumpError::NoSuchLine {
            line,
            total: lines.len(),
        })?;

    let LineClass::Content(content) = classify(raw) else {
        return Err(BumpError::NotAnItem { line });
    };

    let record = classify_line(content, &LineContext::new(line, None, ctx.today))
        .map_err(|source| BumpError::Parse { line, source })?;
    if record.kind() != TaskKind::Recurring {
        return Err(BumpError::NotRecurring {
            line,
            kind: record.kind(),
        });
    }

    // A recurring record always carries both dates and a date token.
    let (Some(old_date), Some(new_date), Some(span)) = (
        record.due_date(),
        record.next_occurrence(),
        date_span(content),
    ) else {
        return Err(BumpError::NotRecurring {
            line,
            kind: record.kind(),
        });
    };

    let mut updated_line = content.to_string();
    updated_line.replace_range(span, &new_date.format("%Y-%m-%d").to_string());

    let ending = &raw[content.len()..];
    let mut contents = String::with_capacity(text.len());
    for (index, original) in lines.iter().enumerate() {
        if index + 1 == line {
            contents.push_str(&updated_line);
            contents.push_str(ending);
        } else {
            contents.push_str(original);
        }
    }

    Ok(BumpOutcome {
        line,
        old_date,
        new_date,
        updated_line,
        contents,
    })
}
