//! Fixed sheet layout: which column holds what, and where the summary
//! averages go inside the analytical rows.

use crate::models::period::{Cohort, Period};

/// Task labels (`"genre: name"`), row 1 is the header.
pub const LABEL_COLUMN: &str = "A";
/// Per-task running average, rewritten on every sync.
pub const AVERAGE_COLUMN: &str = "B";
/// Duration typed in for the current day.
pub const DURATION_COLUMN: &str = "D";
/// Previous day's duration, moved here from `D` on every sync.
pub const PREVIOUS_COLUMN: &str = "F";

/// Summary cells as `(cohort, period, rows before the last analytical row)`.
pub const SUMMARY_ROWS: [(Cohort, Period, u32); 6] = [
    (Cohort::Primary, Period::Daily, 7),
    (Cohort::Primary, Period::Weekly, 6),
    (Cohort::Primary, Period::Monthly, 5),
    (Cohort::Alternative, Period::Daily, 2),
    (Cohort::Alternative, Period::Weekly, 1),
    (Cohort::Alternative, Period::Monthly, 0),
];

/// Smallest analytical range that can hold every summary row.
pub const MIN_ANALYTICAL_ROWS: u32 = 8;
