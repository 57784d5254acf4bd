//! Balance check over a work-time table.

use crate::route::WorkTimeTable;

/// Default tolerated spread in minutes. Below roughly 35 the rebalancer tends
/// to shuttle points back and forth; above roughly 120 it rarely moves any.
pub const DEFAULT_THRESHOLD_MIN: f64 = 90.0;

/// Longest minus shortest work time. Zero for an empty table.
pub fn spread(table: &WorkTimeTable) -> f64 {
    let mut values = table.values().copied();
    let Some(first) = values.next() else {
        return 0.0;
    };
    let (min, max) = values.fold((first, first), |(min, max), v| (min.min(v), max.max(v)));
    max - min
}

/// True when the spread is strictly below `threshold`.
pub fn is_balanced(table: &WorkTimeTable, threshold: f64) -> bool {
    spread(table) < threshold
}
