use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sync::SyncLogic;
use crate::db::initialize::open_db;
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::sheet::{self, SheetView};
use crate::ui::messages::{header, success};
use crate::utils::date;
use crate::utils::format_duration;

/// Run the daily synchronization against the configured sheet.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sync { today } = cmd {
        let entry_date = if *today {
            date::today()
        } else {
            date::yesterday()
        };

        let mut pool = open_db(&cfg.database)?;
        let mut view = SheetView::open(sheet::open_from_config(cfg)?)?;
        header(format!("Syncing '{}' for {}", view.title(), entry_date));

        let report = SyncLogic::run(&mut pool, &mut view, entry_date)?;

        for avg in &report.averages {
            println!(
                "  {:<12} {:<8} {}",
                avg.cohort.to_string(),
                avg.period.to_string(),
                format_duration(avg.average, true)
            );
        }

        audit(
            &pool.conn,
            "sync",
            &entry_date.to_string(),
            &format!(
                "{} tasks rolled, {} progress values filled",
                report.rolled_tasks, report.progress_filled
            ),
        );
        success("Successful!");
    }
    Ok(())
}
