//! Task reconciliation: brings the task registry in line with the labels
//! currently in the sheet.

use crate::core::segmenter::GroupRanges;
use crate::db::pool::DbPool;
use crate::db::queries::{apply_task_changes, load_tasks};
use crate::errors::AppResult;
use crate::models::task::{NewTask, Task, TaskGroup, genre_of};
use std::collections::HashMap;

/// Changes to apply to the registry.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReconcilePlan {
    /// Every pre-existing task with its refreshed fields.
    pub updates: Vec<Task>,
    /// Labels seen for the first time.
    pub creates: Vec<NewTask>,
    /// Names of tasks archived by this plan (were active before).
    pub newly_archived: Vec<String>,
    /// Names of tasks brought back from the archive.
    pub restored: Vec<String>,
}

impl ReconcilePlan {
    /// True when applying the plan would not change anything stored.
    pub fn is_noop(&self, before: &[Task]) -> bool {
        self.creates.is_empty() && self.updates.iter().zip(before).all(|(a, b)| a == b)
    }
}

/// Diff `labels` (column A, row 1 first) against `existing`.
///
/// Rows are scanned from row 2. Blank labels are skipped; the first row
/// belonging to the analytical group ends the scan. Tasks not seen in the
/// scan are archived.
pub fn plan(labels: &[String], groups: &GroupRanges, existing: Vec<Task>) -> ReconcilePlan {
    let mut out = ReconcilePlan::default();

    let by_name: HashMap<String, usize> = existing
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.clone(), i))
        .collect();
    let mut tasks = existing;
    let mut seen = vec![false; tasks.len()];
    let mut staged: HashMap<String, usize> = HashMap::new();

    for (idx, label) in labels.iter().enumerate() {
        let row = idx as u32 + 1;
        if row == 1 || label.is_empty() {
            continue;
        }

        let group = match groups.group_of(row) {
            Some(TaskGroup::Analytical) | None => break,
            Some(g) => g,
        };
        let genre = genre_of(label);

        match by_name.get(label.as_str()) {
            Some(&i) => {
                let task = &mut tasks[i];
                if task.archived {
                    out.restored.push(task.name.clone());
                }
                if task.genre.is_none() && genre.is_some() {
                    task.genre = genre;
                }
                task.row = row;
                task.archived = false;
                task.group = group;
                seen[i] = true;
            }
            // A label repeated in the sheet keeps its last position.
            None => match staged.get(label.as_str()) {
                Some(&j) => {
                    let new = &mut out.creates[j];
                    new.row = row;
                    new.group = group;
                }
                None => {
                    staged.insert(label.clone(), out.creates.len());
                    out.creates.push(NewTask {
                        name: label.clone(),
                        row,
                        group,
                        genre,
                    });
                }
            },
        }
    }

    for (task, seen) in tasks.iter_mut().zip(seen) {
        if !seen && !task.archived {
            task.archived = true;
            out.newly_archived.push(task.name.clone());
        }
    }

    out.updates = tasks;
    out
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: usize,
    pub archived: usize,
    pub restored: usize,
    pub changed: bool,
}

/// Load the registry, plan against `labels`, and apply the plan as one
/// transaction.
pub fn reconcile(pool: &mut DbPool, labels: &[String], groups: &GroupRanges) -> AppResult<ReconcileReport> {
    let existing = load_tasks(&pool.conn)?;
    let plan = plan(labels, groups, existing.clone());

    let report = ReconcileReport {
        created: plan.creates.len(),
        archived: plan.newly_archived.len(),
        restored: plan.restored.len(),
        changed: !plan.is_noop(&existing),
    };

    if report.changed {
        apply_task_changes(&mut pool.conn, &plan.updates, &plan.creates)?;
    }
    Ok(report)
}
