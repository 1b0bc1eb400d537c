//! Ordering of records for display.

use crate::record::TaskRecord;

/// How records are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOrder {
    /// Most distant first instead of most urgent first.
    pub reverse: bool,
    /// Group by category after ordering by urgency.
    pub group_by_category: bool,
}

/// Sorts records by effective days away, then optionally groups them by
/// category.
///
/// Both passes are stable: records that compare equal keep their file order,
/// and grouping keeps the urgency order inside each category. Uncategorized
/// records come before named categories.
pub fn sort_records(records: &mut [TaskRecord], order: SortOrder, cutoff_days: i64) {
    if order.reverse {
        records.sort_by_key(|r| std::cmp::Reverse(r.effective_days_away(cutoff_days)));
    } else {
        records.sort_by_key(|r| r.effective_days_away(cutoff_days));
    }

    if order.group_by_category {
        records.sort_by(|a, b| a.category().cmp(&b.category()));
    }
}

/// Owned variant of [`sort_records`].
pub fn sorted(
    mut records: Vec<TaskRecord>,
    order: SortOrder,
    cutoff_days: i64,
) -> Vec<TaskRecord> {
    sort_records(&mut records, order, cutoff_days);
    records
}
