//! The daily synchronization run.

use crate::core::averager::{self, CohortAverage};
use crate::core::ingest::{self, IngestReport};
use crate::core::progress;
use crate::core::reconcile::{self, ReconcileReport};
use crate::core::writeback;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::sheet::layout::{LABEL_COLUMN, SUMMARY_ROWS};
use crate::sheet::{SheetSource, SheetView};
use crate::ui::messages::{info, step};
use crate::utils::format_duration;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub entry_date: NaiveDate,
    pub reconcile: ReconcileReport,
    pub ingest: IngestReport,
    pub progress_filled: usize,
    pub rolled_tasks: usize,
    pub averages: Vec<CohortAverage>,
}

const STEPS: usize = 5;

pub struct SyncLogic;

impl SyncLogic {
    /// One full pass against an already-taken snapshot:
    /// reconcile → ingest → progress → averages → write-back.
    ///
    /// Each step commits on its own; a failure leaves earlier steps in
    /// place and a re-run picks up from the same snapshot state.
    pub fn run<S: SheetSource + ?Sized>(
        pool: &mut DbPool,
        sheet: &mut SheetView<S>,
        entry_date: NaiveDate,
    ) -> AppResult<SyncReport> {
        // Layout problems abort before anything is written.
        let groups = sheet.groups()?;
        for (_, _, from_end) in SUMMARY_ROWS {
            writeback::summary_row(sheet, from_end)?;
        }

        step(1, STEPS, "Reconciling tasks");
        let labels = sheet.snapshot().column(LABEL_COLUMN);
        let rec = reconcile::reconcile(pool, &labels, &groups)?;
        audit(
            &pool.conn,
            "reconcile",
            sheet.title(),
            &format!(
                "{} created, {} archived, {} restored",
                rec.created, rec.archived, rec.restored
            ),
        );
        info(format!(
            "Tasks reconciled: {} new, {} archived, {} restored.",
            rec.created, rec.archived, rec.restored
        ));

        step(2, STEPS, "Ingesting entries");
        let ing = ingest::ingest(pool, sheet.snapshot(), entry_date)?;
        audit(
            &pool.conn,
            "ingest",
            &entry_date.to_string(),
            &format!(
                "{} created, {} updated, {} skipped",
                ing.created, ing.updated, ing.skipped
            ),
        );
        info(format!(
            "Entries for {}: {} new, {} corrected, {} skipped.",
            entry_date, ing.created, ing.updated, ing.skipped
        ));

        step(3, STEPS, "Filling progress");
        let filled = progress::eval_all_progress(pool)?;
        audit(
            &pool.conn,
            "progress",
            "",
            &format!("{} entries filled", filled),
        );

        // Computed before touching the sheet.
        step(4, STEPS, "Computing averages");
        let averages = averager::compute_all(pool)?;

        step(5, STEPS, "Writing back to the sheet");
        let rolled = writeback::roll_task_cells(pool, sheet)?;
        writeback::write_summaries(sheet, &averages)?;

        let summary = averages
            .iter()
            .map(|a| format!("{}/{}={}", a.cohort, a.period, format_duration(a.average, true)))
            .collect::<Vec<_>>()
            .join(", ");
        audit(&pool.conn, "averages", sheet.title(), &summary);

        Ok(SyncReport {
            entry_date,
            reconcile: rec,
            ingest: ing,
            progress_filled: filled,
            rolled_tasks: rolled,
            averages,
        })
    }
}
