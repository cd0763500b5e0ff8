use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::queries::load_entries_by_date;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{RESET, color_for_progress};
use crate::utils::date;
use crate::utils::formatting::format_date;

/// List the entries recorded on one date.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Entries { date: d } = cmd {
        let day = match d {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?,
            None => date::today(),
        };

        let pool = open_db(&cfg.database)?;
        let entries = load_entries_by_date(&pool.conn, &day)?;

        if entries.is_empty() {
            println!("No entries for {} ({})", day, format_date(day));
            return Ok(());
        }

        for e in entries {
            match e.progress {
                Some(p) => println!("{}{}{}", color_for_progress(p), e, RESET),
                None => println!("{}", e),
            }
        }
    }
    Ok(())
}
