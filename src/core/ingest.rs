//! Reads each active task's duration cell and records it as the day's
//! entry.

use crate::db::pool::DbPool;
use crate::db::queries::{UpsertStats, load_active_tasks, upsert_entries};
use crate::errors::AppResult;
use crate::models::entry::EntryDraft;
use crate::sheet::layout::DURATION_COLUMN;
use crate::sheet::snapshot::Snapshot;
use crate::sheet::address::CellAddress;
use crate::utils::parse_duration;
use chrono::NaiveDate;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub created: usize,
    pub updated: usize,
    /// Active tasks whose cell was blank, malformed or zero.
    pub skipped: usize,
}

/// Build one draft per active task with a usable duration cell.
pub fn collect_drafts(
    pool: &DbPool,
    snapshot: &Snapshot,
    date: NaiveDate,
) -> AppResult<(Vec<EntryDraft>, usize)> {
    let mut drafts = Vec::new();
    let mut skipped = 0;

    for task in load_active_tasks(&pool.conn)? {
        let cell = snapshot.cell(&CellAddress::new(DURATION_COLUMN, task.row)?);
        match parse_duration(cell) {
            Some(d) if !d.is_zero() => drafts.push(EntryDraft {
                task_id: task.id,
                date,
                duration: d,
            }),
            _ => skipped += 1,
        }
    }
    Ok((drafts, skipped))
}

/// Record the day's durations: new entries are created, existing ones for
/// the same (task, date) get their duration corrected.
pub fn ingest(pool: &mut DbPool, snapshot: &Snapshot, date: NaiveDate) -> AppResult<IngestReport> {
    let (drafts, skipped) = collect_drafts(pool, snapshot, date)?;
    let UpsertStats { created, updated } = upsert_entries(&mut pool.conn, &drafts)?;
    Ok(IngestReport {
        created,
        updated,
        skipped,
    })
}
