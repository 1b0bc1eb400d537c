//! Calendar date helpers.
//!
//! Dates in a todo file are plain ISO calendar dates (`YYYY-MM-DD`) with no
//! time or timezone component, so everything here works on [`NaiveDate`].

use chrono::NaiveDate;
use thiserror::Error;

/// Errors from [`parse_calendar_date`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateError {
    /// The string is not three dash-separated numbers.
    #[error("malformed date: {value} (expected YYYY-MM-DD)")]
    Malformed {
        /// The rejected input.
        value: String,
    },

    /// The numbers do not name a real calendar day (e.g. month 13, day 32).
    #[error("date out of range: {value}")]
    OutOfRange {
        /// The rejected input.
        value: String,
    },
}

/// Parses an ISO calendar date of the form `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns [`DateError::Malformed`] unless the input splits into exactly three
/// purely numeric components, and [`DateError::OutOfRange`] when those
/// components do not form a valid date (leap years are honoured).
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, DateError> {
    let malformed = || DateError::Malformed {
        value: s.to_string(),
    };

    let parts: Vec<&str> = s.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(malformed());
    };

    if [year, month, day]
        .iter()
        .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(malformed());
    }

    let year: i32 = year.parse().map_err(|_| malformed())?;
    let month: u32 = month.parse().map_err(|_| malformed())?;
    let day: u32 = day.parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::OutOfRange {
        value: s.to_string(),
    })
}

/// Returns `a - reference` in whole days. Negative when `a` is in the past.
pub fn days_between(a: NaiveDate, reference: NaiveDate) -> i64 {
    (a - reference).num_days()
}
