//! Core of the rastodo text based todo list.
//!
//! A todo file is a plain text file with one item per line, grouped under
//! `[category]` headers:
//!
//! ```text
//! c0 always today (this doesn't have a category)
//!
//! [CS101]
//! t  2014-06-03 week 1 lab report
//! a2 2014-06-05 12:30 appointment with lecturer
//! r3 2014-06-10 =2w water the plants
//! ```
//!
//! The pipeline is: [`parse_and_filter`] (or [`parse_lines`] followed by
//! [`FilterPolicy::filter`]), then [`sort_records`], then [`render`] per
//! record.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rastodo_core::{
//!     parse_and_filter, render, sort_records, DisplayOptions, FilterPolicy, ParseContext,
//!     SortOrder,
//! };
//!
//! let text = "[CS101]\nt 2014-06-03 lab report\nc0 see lecturer\n";
//! let ctx = ParseContext::new(NaiveDate::from_ymd_opt(2014, 6, 1).unwrap());
//! let policy = FilterPolicy::default();
//!
//! let mut parsed = parse_and_filter(text.lines(), &ctx, &policy);
//! sort_records(&mut parsed.records, SortOrder::default(), policy.cutoff_days());
//!
//! let lines: Vec<String> = parsed
//!     .records
//!     .iter()
//!     .map(|r| render(r, &DisplayOptions::default()))
//!     .collect();
//! assert_eq!(lines[0], "c [00]       [CS101] see lecturer");
//! assert_eq!(lines[1], "t [02] 06-03 [CS101] lab report");
//! ```

pub mod bump;
pub mod date;
pub mod file;
pub mod grammar;
pub mod policy;
pub mod record;
pub mod render;
pub mod sort;

pub use bump::{bump, BumpError, BumpOutcome};
pub use date::{days_between, parse_calendar_date, DateError};
pub use file::{parse_and_filter, parse_lines, Diagnostic, ParseContext, ParsedFile};
pub use grammar::{classify_line, LineContext, ParseError};
pub use policy::{FilterPolicy, FilterPolicyBuilder, PolicyError, DEFAULT_CUTOFF_DAYS};
pub use record::{Recurrence, RecurrenceAnchor, RecurrenceUnit, TaskKind, TaskRecord};
pub use render::{render, DisplayOptions, UrgencyBand};
pub use sort::{sort_records, sorted, SortOrder};
