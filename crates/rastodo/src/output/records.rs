//! Listing output formatting.

use chrono::NaiveDate;
use rastodo_core::{render, DisplayOptions, Recurrence, TaskKind, TaskRecord};
use serde::Serialize;

/// JSON output structure for a single listed record.
#[derive(Serialize)]
pub struct RecordOutput<'a> {
    pub line: usize,
    pub kind: TaskKind,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_away: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity_window: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_occurrence: Option<NaiveDate>,
}

impl<'a> From<&'a TaskRecord> for RecordOutput<'a> {
    fn from(record: &'a TaskRecord) -> Self {
        Self {
            line: record.source_line(),
            kind: record.kind(),
            description: record.description(),
            category: record.category(),
            due_date: record.due_date(),
            days_away: record.days_away(),
            proximity_window: record.proximity_window(),
            recurrence: record.recurrence(),
            next_occurrence: record.next_occurrence(),
        }
    }
}

/// Formats records as a JSON array, in the given order.
pub fn format_records_json(records: &[TaskRecord]) -> serde_json::Result<String> {
    let output: Vec<RecordOutput<'_>> = records.iter().map(RecordOutput::from).collect();
    serde_json::to_string_pretty(&output)
}

/// Renders one line (or two in two-line mode) per record.
pub fn format_records_text(records: &[TaskRecord], options: &DisplayOptions) -> String {
    let mut output = String::new();
    for record in records {
        output.push_str(&render(record, options));
        output.push('\n');
    }
    output
}
