//! Output formatting utilities for the rastodo CLI.
//!
//! - [`records`] - listing output (rendered lines or JSON)
//! - [`bump`] - result of bumping a recurring item

mod bump;
mod records;

pub use bump::{format_bump_json, format_bump_preview};
pub use records::{format_records_json, format_records_text};
