//! Splits the label column into the three blank-separated row groups.

use crate::errors::{AppError, AppResult};
use crate::models::task::TaskGroup;

/// Inclusive 1-based row range. `first > last` means the run was empty
/// (two blank rows in a row).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub first: u32,
    pub last: u32,
}

impl RowRange {
    pub fn contains(&self, row: u32) -> bool {
        self.first <= row && row <= self.last
    }

    pub fn len(&self) -> u32 {
        (self.last + 1).saturating_sub(self.first)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRanges {
    pub productive: RowRange,
    pub alternative: RowRange,
    pub analytical: RowRange,
}

impl GroupRanges {
    pub fn range(&self, group: TaskGroup) -> RowRange {
        match group {
            TaskGroup::Productive => self.productive,
            TaskGroup::Alternative => self.alternative,
            TaskGroup::Analytical => self.analytical,
        }
    }

    /// Group whose range contains `row`, if any.
    pub fn group_of(&self, row: u32) -> Option<TaskGroup> {
        TaskGroup::ORDERED
            .into_iter()
            .find(|g| self.range(*g).contains(row))
    }
}

/// Scan `labels` (column top to bottom, trailing blanks already trimmed)
/// and name the first three runs productive, alternative, analytical.
///
/// Row 1 is the header. A blank label closes the current run; the last
/// row always closes the final run. Runs past the third are ignored;
/// fewer than three is a layout error.
pub fn segment(labels: &[String]) -> AppResult<GroupRanges> {
    let total = labels.len() as u32;
    let mut runs: Vec<RowRange> = Vec::new();
    let mut start = 2;

    for (idx, label) in labels.iter().enumerate() {
        let row = idx as u32 + 1;
        if row == 1 {
            continue;
        }
        if label.is_empty() {
            runs.push(RowRange {
                first: start,
                last: row - 1,
            });
            start = row + 1;
        }
        if row == total {
            runs.push(RowRange { first: start, last: row });
        }
    }

    if runs.len() < TaskGroup::ORDERED.len() {
        return Err(AppError::SheetLayout(format!(
            "expected 3 blank-separated groups below the header, found {}",
            runs.len()
        )));
    }

    Ok(GroupRanges {
        productive: runs[0],
        alternative: runs[1],
        analytical: runs[2],
    })
}
