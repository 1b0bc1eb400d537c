//! Line classifier and parser for todo items.
//!
//! Each item type has one row in a fixed grammar table: the type letter, the
//! regular expression its lines must match, and a field extractor that turns
//! the captures into a [`TaskRecord`]. The first character of a line (in
//! either case) selects the row.
//!
//! # Formats
//!
//! ```text
//! t  2014-06-03          description   todo, due by the date
//! s5 2014-06-06          description   sleeping, shown within 5 days of due
//! a2 2014-06-05          description   appointment, like sleeping
//! c2                     description   constant, always 2 days away
//! w                      description   wishlist, no date
//! r3 2016-02-01 =2w      description   recurring, next due 2 weeks after due
//! r3 2016-02-01 +10d     description   recurring, next due 10 days after today
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rastodo_core::grammar::{classify_line, LineContext};
//! use rastodo_core::TaskKind;
//!
//! let today = NaiveDate::from_ymd_opt(2014, 6, 1).unwrap();
//! let ctx = LineContext::new(4, Some("CS101"), today);
//! let record = classify_line("t  2014-06-03 week 1 lab report", &ctx).unwrap();
//!
//! assert_eq!(record.kind(), TaskKind::Todo);
//! assert_eq!(record.days_away(), Some(2));
//! assert_eq!(record.category(), Some("CS101"));
//! ```

mod error;

use std::ops::Range;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::date::parse_calendar_date;
use crate::record::{Origin, Recurrence, RecurrenceAnchor, RecurrenceUnit, TaskKind, TaskRecord};

pub use error::{ParseError, ParseResult};

/// Where a line sits and what day it is being read on.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// 1-based line number.
    pub line_number: usize,
    /// The current category header, if any.
    pub category: Option<&'a str>,
    /// Reference date for days-away and next-occurrence arithmetic.
    pub today: NaiveDate,
}

impl<'a> LineContext<'a> {
    pub fn new(line_number: usize, category: Option<&'a str>, today: NaiveDate) -> Self {
        Self {
            line_number,
            category,
            today,
        }
    }

    fn origin(&self) -> Origin {
        Origin {
            line: self.line_number,
            category: self.category.map(str::to_string),
        }
    }
}

type Extractor = fn(TaskKind, &Captures<'_>, &LineContext<'_>) -> ParseResult<TaskRecord>;

/// One row of the grammar table.
struct GrammarRule {
    kind: TaskKind,
    pattern: Regex,
    extract: Extractor,
}

const DATE: &str = r"(?P<date>[0-9]{4}-[0-9]{2}-[0-9]{2})";
const DESC: &str = r"(?P<desc>\S.*)";

fn rule(kind: TaskKind, pattern: String, extract: Extractor) -> GrammarRule {
    GrammarRule {
        kind,
        pattern: Regex::new(&pattern).expect("valid grammar regex"),
        extract,
    }
}

static GRAMMAR: Lazy<Vec<GrammarRule>> = Lazy::new(|| {
    vec![
        rule(
            TaskKind::Todo,
            format!(r"^[Tt]\s+{DATE}\s+{DESC}$"),
            extract_dated,
        ),
        rule(
            TaskKind::Sleeping,
            format!(r"^[Ss](?P<wake>[0-9]+)\s+{DATE}\s+{DESC}$"),
            extract_dated,
        ),
        rule(
            TaskKind::Appointment,
            format!(r"^[Aa](?P<wake>[0-9]+)\s+{DATE}\s+{DESC}$"),
            extract_dated,
        ),
        rule(
            TaskKind::Constant,
            format!(r"^[Cc](?P<days>[0-9]+)\s+{DESC}$"),
            extract_constant,
        ),
        rule(
            TaskKind::Wishlist,
            format!(r"^[Ww]\s+{DESC}$"),
            extract_wishlist,
        ),
        rule(
            TaskKind::Recurring,
            format!(
                r"^[Rr](?P<wake>[0-9]+)\s+{DATE}\s+(?P<anchor>[=+])(?P<count>[0-9]+)(?P<unit>[dwmy])\s+{DESC}$"
            ),
            extract_recurring,
        ),
    ]
});

/// Selects the grammar row for a line from its first character.
fn rule_for(line: &str) -> ParseResult<&'static GrammarRule> {
    let first = line.chars().next().ok_or(ParseError::Empty)?;
    TaskKind::from_letter(first)
        .and_then(|kind| GRAMMAR.iter().find(|r| r.kind == kind))
        .ok_or(ParseError::Unrecognized { first })
}

/// Parses one content line into a [`TaskRecord`].
///
/// The line must already be known not to be blank, a comment or a category
/// header.
///
/// # Errors
///
/// Returns [`ParseError::Unrecognized`] for an unknown type letter,
/// [`ParseError::Malformed`] when the line does not follow its type's format,
/// [`ParseError::InvalidDate`] for impossible dates and
/// [`ParseError::UnsupportedUnit`] for month/year recurrences.
pub fn classify_line(line: &str, ctx: &LineContext<'_>) -> ParseResult<TaskRecord> {
    let rule = rule_for(line)?;
    let caps = rule
        .pattern
        .captures(line)
        .ok_or(ParseError::Malformed { kind: rule.kind })?;
    (rule.extract)(rule.kind, &caps, ctx)
}

/// Byte range of the date token in a dated item line.
pub(crate) fn date_span(line: &str) -> Option<Range<usize>> {
    let rule = rule_for(line).ok()?;
    rule.pattern
        .captures(line)?
        .name("date")
        .map(|m| m.range())
}

fn description(caps: &Captures<'_>) -> String {
    caps["desc"].to_string()
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, name: &str) -> ParseResult<T> {
    let digits = &caps[name];
    digits
        .parse()
        .map_err(|_| ParseError::number_out_of_range(digits))
}

fn due_date(caps: &Captures<'_>) -> ParseResult<NaiveDate> {
    Ok(parse_calendar_date(&caps["date"])?)
}

fn extract_dated(
    kind: TaskKind,
    caps: &Captures<'_>,
    ctx: &LineContext<'_>,
) -> ParseResult<TaskRecord> {
    let wake = match caps.name("wake") {
        Some(_) => Some(number::<u32>(caps, "wake")?),
        None => None,
    };
    Ok(TaskRecord::dated(
        kind,
        description(caps),
        ctx.origin(),
        due_date(caps)?,
        wake,
        ctx.today,
    ))
}

fn extract_constant(
    _: TaskKind,
    caps: &Captures<'_>,
    ctx: &LineContext<'_>,
) -> ParseResult<TaskRecord> {
    Ok(TaskRecord::constant(
        description(caps),
        ctx.origin(),
        number::<i64>(caps, "days")?,
    ))
}

fn extract_wishlist(
    _: TaskKind,
    caps: &Captures<'_>,
    ctx: &LineContext<'_>,
) -> ParseResult<TaskRecord> {
    Ok(TaskRecord::wishlist(description(caps), ctx.origin()))
}

fn extract_recurring(
    _: TaskKind,
    caps: &Captures<'_>,
    ctx: &LineContext<'_>,
) -> ParseResult<TaskRecord> {
    let unit = match &caps["unit"] {
        "d" => RecurrenceUnit::Day,
        "w" => RecurrenceUnit::Week,
        // m and y have no fixed length
        other => {
            return Err(ParseError::UnsupportedUnit {
                unit: other.chars().next().unwrap_or('?'),
            })
        }
    };
    let anchor = if &caps["anchor"] == "+" {
        RecurrenceAnchor::FromToday
    } else {
        RecurrenceAnchor::FromDueDate
    };
    let recurrence = Recurrence {
        anchor,
        count: number(caps, "count")?,
        unit,
    };

    let due = due_date(caps)?;
    let next = recurrence
        .next_occurrence(due, ctx.today)
        .ok_or(ParseError::DateOverflow)?;

    Ok(TaskRecord::recurring(
        description(caps),
        ctx.origin(),
        due,
        number(caps, "wake")?,
        recurrence,
        next,
        ctx.today,
    ))
}

#[cfg(test)]
mod tests;
