//! Text rendering of records.
//!
//! Rendering is a pure function of a record and [`DisplayOptions`]; records
//! are never modified.

use chrono::NaiveDate;
use owo_colors::{AnsiColors, OwoColorize};

use crate::record::{TaskKind, TaskRecord};

/// Width of an `MM-DD` date field.
const DATE_WIDTH: usize = 5;

/// Width of a `[NN]` days field.
const DAYS_WIDTH: usize = 4;

/// How records are turned into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Prefix each line with the record's line number in the file.
    pub line_numbers: bool,
    /// Put the description on its own line.
    pub two_lines: bool,
    /// Wrap each record in an ANSI colour for its urgency band.
    pub use_colors: bool,
}

/// How close a record is to being due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrgencyBand {
    /// No date at all (wishlist).
    Neutral,
    /// More than four days away.
    Far,
    /// One to four days away.
    Near,
    /// Due today.
    DueNow,
    /// Past due.
    Overdue,
}

impl UrgencyBand {
    /// Classifies a days-away value.
    pub fn from_days(days_away: Option<i64>) -> Self {
        match days_away {
            None => UrgencyBand::Neutral,
            Some(d) if d > 4 => UrgencyBand::Far,
            Some(d) if d > 0 => UrgencyBand::Near,
            Some(0) => UrgencyBand::DueNow,
            Some(_) => UrgencyBand::Overdue,
        }
    }

    /// Terminal colour used for this band.
    pub fn color(self) -> AnsiColors {
        match self {
            UrgencyBand::Neutral => AnsiColors::Blue,
            UrgencyBand::Far => AnsiColors::Green,
            UrgencyBand::Near => AnsiColors::Yellow,
            UrgencyBand::DueNow => AnsiColors::Magenta,
            UrgencyBand::Overdue => AnsiColors::Red,
        }
    }
}

fn format_date(kind: TaskKind, date: Option<NaiveDate>) -> String {
    match date {
        None => " ".repeat(DATE_WIDTH),
        Some(date) if kind == TaskKind::Appointment => date.format("%m-%d %a:").to_string(),
        Some(date) => date.format("%m-%d").to_string(),
    }
}

fn format_days(days_away: Option<i64>) -> String {
    match days_away {
        None => " ".repeat(DAYS_WIDTH),
        Some(days) => format!("[{days:02}]"),
    }
}

/// Renders one record.
///
/// Layout: `[NNN ]<kind> <[days]> <date> [<category>] <description>`, with
/// `[next YYYY-MM-DD]` appended for recurring items. In two-line mode the
/// space before the description becomes a newline. With colours on, the
/// whole line after the line number is wrapped in the band colour.
pub fn render(record: &TaskRecord, options: &DisplayOptions) -> String {
    let mut body = format!(
        "{} {} {}",
        record.kind(),
        format_days(record.days_away()),
        format_date(record.kind(), record.due_date()),
    );

    if let Some(category) = record.category() {
        body.push_str(&format!(" [{category}]"));
    }

    body.push(if options.two_lines { '\n' } else { ' ' });
    body.push_str(record.description());

    if let Some(next) = record.next_occurrence() {
        body.push_str(&format!(" [next {}]", next.format("%Y-%m-%d")));
    }

    if options.use_colors {
        let band = UrgencyBand::from_days(record.days_away());
        body = body.color(band.color()).to_string();
    }

    if options.line_numbers {
        format!("{:03} {body}", record.source_line())
    } else {
        body
    }
}
