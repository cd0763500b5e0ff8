//! Sheet write-back: per-task average roll-over and the six summary cells.

use crate::core::averager::CohortAverage;
use crate::db::pool::DbPool;
use crate::db::queries::{load_active_tasks, task_average};
use crate::errors::{AppError, AppResult};
use crate::sheet::layout::{
    AVERAGE_COLUMN, DURATION_COLUMN, MIN_ANALYTICAL_ROWS, PREVIOUS_COLUMN, SUMMARY_ROWS,
};
use crate::sheet::{SheetSource, SheetView};
use crate::utils::format_duration;

/// For every active task: move today's `D` value to `F`, clear `D`, and
/// write the task's all-time average into `B` (keeping the old `B` value
/// while the task has no average yet).
pub fn roll_task_cells<S: SheetSource + ?Sized>(
    pool: &DbPool,
    sheet: &mut SheetView<S>,
) -> AppResult<usize> {
    let tasks = load_active_tasks(&pool.conn)?;

    for task in &tasks {
        let average = task_average(&pool.conn, task.id)?;
        let value = if average.is_zero() {
            sheet.cell(AVERAGE_COLUMN, task.row)?.to_string()
        } else {
            format_duration(average, true)
        };
        let today = sheet.cell(DURATION_COLUMN, task.row)?.to_string();

        sheet.write(PREVIOUS_COLUMN, task.row, &today)?;
        sheet.write(DURATION_COLUMN, task.row, "")?;
        sheet.write(AVERAGE_COLUMN, task.row, &value)?;
    }
    Ok(tasks.len())
}

/// Row that receives a summary value `from_end` rows above the last
/// analytical row. Fails when the analytical group is too short.
pub fn summary_row<S: SheetSource + ?Sized>(sheet: &mut SheetView<S>, from_end: u32) -> AppResult<u32> {
    let range = sheet.groups()?.analytical;
    if range.len() < MIN_ANALYTICAL_ROWS {
        return Err(AppError::SheetLayout(format!(
            "analytical group spans rows {}-{}; at least {} rows are needed for the summary",
            range.first, range.last, MIN_ANALYTICAL_ROWS
        )));
    }
    Ok(range.last - from_end)
}

/// Write the six averages into their fixed summary cells.
pub fn write_summaries<S: SheetSource + ?Sized>(
    sheet: &mut SheetView<S>,
    averages: &[CohortAverage],
) -> AppResult<()> {
    // Resolve every target before the first write.
    let mut targets = Vec::with_capacity(SUMMARY_ROWS.len());
    for (cohort, period, from_end) in SUMMARY_ROWS {
        let avg = averages
            .iter()
            .find(|a| a.cohort == cohort && a.period == period)
            .ok_or_else(|| AppError::Other(format!("missing {cohort} {period} average")))?;
        targets.push((summary_row(sheet, from_end)?, format_duration(avg.average, true)));
    }

    for (row, value) in targets {
        sheet.write(AVERAGE_COLUMN, row, &value)?;
    }
    Ok(())
}
