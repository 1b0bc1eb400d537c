//! Inclusion rules for parsed records.
//!
//! A [`FilterPolicy`] is built once from the user's options and then only
//! read. It decides, per record:
//!
//! 1. sleeping items are hidden until their proximity window reaches them,
//! 2. items further away than the cutoff are hidden,
//! 3. only allowed item types are shown,
//! 4. category allow/deny lists, where the allow list wins.
//!
//! With `show_all` set every record is included.
//!
//! # Example
//!
//! ```
//! use rastodo_core::policy::FilterPolicy;
//!
//! let policy = FilterPolicy::builder()
//!     .cutoff_days(14)
//!     .exclude_types("w")
//!     .only_categories(["CS101"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(policy.cutoff_days(), 14);
//! ```

mod error;

use std::collections::BTreeSet;

use crate::record::{TaskKind, TaskRecord};

pub use error::{PolicyError, PolicyResult};

/// Default number of days ahead an item is shown.
pub const DEFAULT_CUTOFF_DAYS: i64 = 22;

/// Per-record inclusion test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPolicy {
    cutoff_days: i64,
    allowed_types: BTreeSet<TaskKind>,
    only_categories: Option<BTreeSet<String>>,
    exclude_categories: Option<BTreeSet<String>>,
    show_all: bool,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            cutoff_days: DEFAULT_CUTOFF_DAYS,
            allowed_types: TaskKind::ALL.into_iter().collect(),
            only_categories: None,
            exclude_categories: None,
            show_all: false,
        }
    }
}

impl FilterPolicy {
    /// Starts a builder with the defaults: 22 days, all types, no categories.
    pub fn builder() -> FilterPolicyBuilder {
        FilterPolicyBuilder::default()
    }

    pub fn cutoff_days(&self) -> i64 {
        self.cutoff_days
    }

    pub fn allowed_types(&self) -> &BTreeSet<TaskKind> {
        &self.allowed_types
    }

    pub fn only_categories(&self) -> Option<&BTreeSet<String>> {
        self.only_categories.as_ref()
    }

    /// The deny list. Ignored by [`includes`](Self::includes) when an allow
    /// list is present.
    pub fn exclude_categories(&self) -> Option<&BTreeSet<String>> {
        self.exclude_categories.as_ref()
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// Returns true if the record should be shown.
    pub fn includes(&self, record: &TaskRecord) -> bool {
        if self.show_all {
            return true;
        }

        let days = record.effective_days_away(self.cutoff_days);

        // Not yet awake
        if let Some(window) = record.proximity_window() {
            if i64::from(window) < days {
                return false;
            }
        }

        if days > self.cutoff_days {
            return false;
        }

        if !self.allowed_types.contains(&record.kind()) {
            return false;
        }

        let category = record.category();
        if let Some(only) = &self.only_categories {
            return category.is_some_and(|c| only.contains(c));
        }
        if let Some(exclude) = &self.exclude_categories {
            return !category.is_some_and(|c| exclude.contains(c));
        }

        true
    }

    /// Keeps the records this policy includes, preserving order.
    pub fn filter(&self, mut records: Vec<TaskRecord>) -> Vec<TaskRecord> {
        records.retain(|r| self.includes(r));
        records
    }
}

/// Parses a string of type letters such as `"tsa"`.
///
/// # Errors
///
/// Returns [`PolicyError::UnknownType`] for any letter that is not one of
/// `tsacwr` (either case).
pub fn parse_type_letters(letters: &str) -> PolicyResult<BTreeSet<TaskKind>> {
    letters
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| TaskKind::from_letter(c).ok_or(PolicyError::UnknownType(c)))
        .collect()
}

/// Splits a comma-separated category list.
pub fn split_categories(list: &str) -> Vec<String> {
    list.split(',').map(str::to_string).collect()
}

/// Builder for [`FilterPolicy`].
///
/// Validation happens in [`build`](Self::build) so option errors surface
/// before any parsing starts.
#[derive(Debug, Clone, Default)]
pub struct FilterPolicyBuilder {
    cutoff_days: Option<i64>,
    only_types: Option<String>,
    exclude_types: Option<String>,
    only_categories: Option<BTreeSet<String>>,
    exclude_categories: Option<BTreeSet<String>>,
    show_all: bool,
}

impl FilterPolicyBuilder {
    pub fn cutoff_days(mut self, days: i64) -> Self {
        self.cutoff_days = Some(days);
        self
    }

    /// Restricts output to these type letters. Takes precedence over
    /// [`exclude_types`](Self::exclude_types).
    pub fn only_types(mut self, letters: impl Into<String>) -> Self {
        self.only_types = Some(letters.into());
        self
    }

    /// Removes these type letters from the full set.
    pub fn exclude_types(mut self, letters: impl Into<String>) -> Self {
        self.exclude_types = Some(letters.into());
        self
    }

    pub fn only_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only_categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn exclude_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    /// Validates the options and builds the policy.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::NegativeCutoff`] for a negative cutoff,
    /// [`PolicyError::UnknownType`] for a bad type letter and
    /// [`PolicyError::NoTypes`] when no type remains.
    pub fn build(self) -> PolicyResult<FilterPolicy> {
        let cutoff_days = self.cutoff_days.unwrap_or(DEFAULT_CUTOFF_DAYS);
        if cutoff_days < 0 {
            return Err(PolicyError::NegativeCutoff(cutoff_days));
        }

        let allowed_types = match (&self.only_types, &self.exclude_types) {
            (Some(only), _) => parse_type_letters(only)?,
            (None, Some(excluded)) => {
                let excluded = parse_type_letters(excluded)?;
                TaskKind::ALL
                    .into_iter()
                    .filter(|k| !excluded.contains(k))
                    .collect()
            }
            (None, None) => TaskKind::ALL.into_iter().collect(),
        };
        if allowed_types.is_empty() {
            return Err(PolicyError::NoTypes);
        }

        Ok(FilterPolicy {
            cutoff_days,
            allowed_types,
            only_categories: self.only_categories,
            exclude_categories: self.exclude_categories,
            show_all: self.show_all,
        })
    }
}
