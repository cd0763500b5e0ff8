use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::averager::{monthly_windows, period_average, weekly_windows};
use crate::db::initialize::open_db;
use crate::db::queries::daily_totals;
use crate::errors::AppResult;
use crate::models::period::{Cohort, Period};
use crate::ui::messages::{header, warning};
use crate::utils::format_duration;
use crate::utils::table::{Column, Table};

/// Print the cohort averages from the stored history.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { cohort, breakdown } = cmd {
        let pool = open_db(&cfg.database)?;

        let cohorts: Vec<Cohort> = match cohort {
            Some(c) => vec![*c],
            None => Cohort::ALL.to_vec(),
        };

        for cohort in cohorts {
            let totals = daily_totals(&pool.conn, cohort.group())?;
            header(format!("{} cohort", cohort));

            if totals.is_empty() {
                warning("No recorded durations yet.");
                continue;
            }

            let mut table = Table::new(vec![Column::new("PERIOD", 8), Column::new("AVERAGE", 10)]);
            for period in Period::ALL {
                let avg = period_average(&totals, cohort, period)?;
                table.add_row(vec![period.to_string(), format_duration(avg, true)]);
            }
            print!("{}", table.render());

            if *breakdown {
                print_windows("Weeks", weekly_windows(&totals)?);
                print_windows("Months", monthly_windows(&totals)?);
            }
        }
    }
    Ok(())
}

fn print_windows(title: &str, windows: Option<Vec<crate::core::averager::Window>>) {
    println!("\n{}:", title);
    match windows {
        Some(ws) if !ws.is_empty() => {
            let mut table = Table::new(vec![Column::new("WINDOW", 10), Column::new("TOTAL", 10)]);
            for w in ws {
                table.add_row(vec![w.label, format_duration(w.total, true)]);
            }
            table.fit();
            print!("{}", table.render());
        }
        _ => println!("  (history too short; the scaled daily average is used)"),
    }
}
