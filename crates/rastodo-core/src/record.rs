//! Task records produced by the line parser.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::date::days_between;

/// The closed set of record variants a todo line can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// `t` - due by a date.
    Todo,
    /// `s` - hidden until within N days of its date.
    Sleeping,
    /// `a` - like sleeping, rendered with the weekday.
    Appointment,
    /// `c` - no date, a fixed number of days away.
    Constant,
    /// `w` - no date, no priority, always eligible.
    Wishlist,
    /// `r` - dated, with a rule for the next occurrence.
    Recurring,
}

impl TaskKind {
    /// Every kind, in the order their letters are listed in help output.
    pub const ALL: [TaskKind; 6] = [
        TaskKind::Todo,
        TaskKind::Sleeping,
        TaskKind::Appointment,
        TaskKind::Constant,
        TaskKind::Wishlist,
        TaskKind::Recurring,
    ];

    /// Returns the lowercase letter identifying this kind in a todo file.
    pub fn letter(self) -> char {
        match self {
            TaskKind::Todo => 't',
            TaskKind::Sleeping => 's',
            TaskKind::Appointment => 'a',
            TaskKind::Constant => 'c',
            TaskKind::Wishlist => 'w',
            TaskKind::Recurring => 'r',
        }
    }

    /// Looks up a kind by its letter (case-insensitive).
    pub fn from_letter(c: char) -> Option<TaskKind> {
        let c = c.to_ascii_lowercase();
        TaskKind::ALL.into_iter().find(|k| k.letter() == c)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// What the next occurrence of a recurring item is counted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceAnchor {
    /// `+` - counted from the day the file is read.
    FromToday,
    /// `=` - counted from the current due date.
    FromDueDate,
}

/// Unit of a recurrence interval.
///
/// Only fixed-length units exist; month and year intervals are rejected by
/// the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceUnit {
    Day,
    Week,
}

impl RecurrenceUnit {
    fn days(self) -> i64 {
        match self {
            RecurrenceUnit::Day => 1,
            RecurrenceUnit::Week => 7,
        }
    }
}

/// A parsed `+2w` / `=10d` recurrence token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recurrence {
    pub anchor: RecurrenceAnchor,
    pub count: u32,
    pub unit: RecurrenceUnit,
}

impl Recurrence {
    /// Computes the next due date, or `None` if it would overflow the calendar.
    pub fn next_occurrence(&self, due_date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
        let base = match self.anchor {
            RecurrenceAnchor::FromToday => today,
            RecurrenceAnchor::FromDueDate => due_date,
        };
        let step = Duration::try_days(i64::from(self.count) * self.unit.days())?;
        base.checked_add_signed(step)
    }
}

/// Where in the file a record came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Origin {
    pub line: usize,
    pub category: Option<String>,
}

/// A single todo item.
///
/// Built once by the line parser and never modified afterwards; rendering
/// works on a shared reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    kind: TaskKind,
    description: String,
    source_line: usize,
    category: Option<String>,
    due_date: Option<NaiveDate>,
    proximity_window: Option<u32>,
    days_away: Option<i64>,
    recurrence: Option<Recurrence>,
    next_occurrence: Option<NaiveDate>,
}

impl TaskRecord {
    /// Todo, Sleeping and Appointment records.
    pub(crate) fn dated(
        kind: TaskKind,
        description: String,
        origin: Origin,
        due_date: NaiveDate,
        proximity_window: Option<u32>,
        today: NaiveDate,
    ) -> Self {
        Self {
            kind,
            description,
            source_line: origin.line,
            category: origin.category,
            due_date: Some(due_date),
            proximity_window,
            days_away: Some(days_between(due_date, today)),
            recurrence: None,
            next_occurrence: None,
        }
    }

    pub(crate) fn recurring(
        description: String,
        origin: Origin,
        due_date: NaiveDate,
        proximity_window: u32,
        recurrence: Recurrence,
        next_occurrence: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        Self {
            recurrence: Some(recurrence),
            next_occurrence: Some(next_occurrence),
            ..Self::dated(
                TaskKind::Recurring,
                description,
                origin,
                due_date,
                Some(proximity_window),
                today,
            )
        }
    }

    pub(crate) fn constant(description: String, origin: Origin, days_away: i64) -> Self {
        Self {
            kind: TaskKind::Constant,
            description,
            source_line: origin.line,
            category: origin.category,
            due_date: None,
            proximity_window: None,
            days_away: Some(days_away),
            recurrence: None,
            next_occurrence: None,
        }
    }

    pub(crate) fn wishlist(description: String, origin: Origin) -> Self {
        Self {
            kind: TaskKind::Wishlist,
            description,
            source_line: origin.line,
            category: origin.category,
            due_date: None,
            proximity_window: None,
            days_away: None,
            recurrence: None,
            next_occurrence: None,
        }
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 1-based line number in the todo file.
    pub fn source_line(&self) -> usize {
        self.source_line
    }

    /// The last `[header]` seen above this line, if any.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// The "wake" threshold of sleeping, appointment and recurring items.
    pub fn proximity_window(&self) -> Option<u32> {
        self.proximity_window
    }

    /// Days until due; negative when overdue, `None` only for wishlist items.
    pub fn days_away(&self) -> Option<i64> {
        self.days_away
    }

    pub fn recurrence(&self) -> Option<Recurrence> {
        self.recurrence
    }

    /// The date a recurring item is due after its current due date.
    pub fn next_occurrence(&self) -> Option<NaiveDate> {
        self.next_occurrence
    }

    /// Days away, with date-less records pinned to `cutoff_days` so they pass
    /// the cutoff test and sort at the boundary.
    pub fn effective_days_away(&self, cutoff_days: i64) -> i64 {
        self.days_away.unwrap_or(cutoff_days)
    }
}
