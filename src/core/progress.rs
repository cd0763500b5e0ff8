//! Per-entry progress: an entry's duration as a percentage of its task's
//! average duration up to and including the entry's date.
//!
//! Progress is written once. Correcting an entry's duration afterwards
//! does not recompute it.

use crate::db::pool::DbPool;
use crate::db::queries::{load_pending_progress, set_progress, task_totals};
use crate::errors::AppResult;
use crate::models::entry::Entry;
use chrono::Duration;

/// `duration / (total / count) * 100`, rounded to two decimals.
/// `None` when there is no positive total to compare against.
///
/// Computed as `duration * count / total` so the average is never rounded
/// before the division.
pub fn progress_ratio(duration: Duration, total: Duration, count: usize) -> Option<f64> {
    let total_ms = total.num_milliseconds();
    if total_ms <= 0 || count == 0 {
        return None;
    }
    let ratio = duration.num_milliseconds() as f64 * count as f64 / total_ms as f64 * 100.0;
    Some((ratio * 100.0).round() / 100.0)
}

/// Compute and store progress for one entry. Returns the stored value, or
/// `None` when the entry has no duration, already has progress, or its
/// task has no usable average.
pub fn eval_progress(pool: &DbPool, entry: &Entry) -> AppResult<Option<f64>> {
    let Some(duration) = entry.duration else {
        return Ok(None);
    };
    if entry.progress.is_some() {
        return Ok(None);
    }

    let (total, count) = task_totals(&pool.conn, entry.task_id, Some(entry.date))?;
    let Some(progress) = progress_ratio(duration, total, count) else {
        return Ok(None);
    };

    if set_progress(&pool.conn, entry.id, progress)? {
        Ok(Some(progress))
    } else {
        Ok(None)
    }
}

/// Fill progress for every entry that has a duration but no progress.
/// Returns how many entries were filled.
pub fn eval_all_progress(pool: &DbPool) -> AppResult<usize> {
    let mut filled = 0;
    for entry in load_pending_progress(&pool.conn)? {
        if eval_progress(pool, &entry)?.is_some() {
            filled += 1;
        }
    }
    Ok(filled)
}
