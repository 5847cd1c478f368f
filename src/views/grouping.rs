//! Kanban columns, date slices and chart counts.

use super::BoardCard;
use crate::task::domain::TaskStatus;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Splits `tasks` into one column per status.
///
/// Every status has an entry, possibly empty, and cards keep their input
/// order inside a column.
#[must_use]
pub fn group_by_status<T: BoardCard>(tasks: &[T]) -> BTreeMap<TaskStatus, Vec<&T>> {
    let mut columns: BTreeMap<TaskStatus, Vec<&T>> =
        TaskStatus::ALL.iter().map(|status| (*status, Vec::new())).collect();
    for task in tasks {
        columns.entry(task.status()).or_default().push(task);
    }
    columns
}

/// Counts cards per status, with a zero entry for empty columns.
#[must_use]
pub fn status_counts<T: BoardCard>(tasks: &[T]) -> BTreeMap<TaskStatus, usize> {
    let mut counts: BTreeMap<TaskStatus, usize> =
        TaskStatus::ALL.iter().map(|status| (*status, 0)).collect();
    for task in tasks {
        *counts.entry(task.status()).or_default() += 1;
    }
    counts
}

/// Returns the cards due inside `range` (both ends included), in input
/// order.
#[must_use]
pub fn due_within<'a, T: BoardCard>(
    tasks: &'a [T],
    range: &RangeInclusive<NaiveDate>,
) -> Vec<&'a T> {
    tasks
        .iter()
        .filter(|task| range.contains(&task.due_date()))
        .collect()
}
