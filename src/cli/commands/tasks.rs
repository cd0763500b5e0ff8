use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::queries::{load_active_tasks, load_tasks, task_average};
use crate::errors::AppResult;
use crate::utils::colors::{GREY, RESET};
use crate::utils::format_duration;
use crate::utils::table::{Column, Table};

/// List tracked tasks with their all-time average.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Tasks { all } = cmd {
        let pool = open_db(&cfg.database)?;
        let tasks = if *all {
            load_tasks(&pool.conn)?
        } else {
            load_active_tasks(&pool.conn)?
        };

        if tasks.is_empty() {
            println!("No tasks yet. Run `rtaskledger sync` first.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ROW", 4),
            Column::new("NAME", 20),
            Column::new("GROUP", 11),
            Column::new("GENRE", 8),
            Column::new("AVERAGE", 8),
            Column::new("STATE", 8),
        ]);

        for t in &tasks {
            let avg = format_duration(task_average(&pool.conn, t.id)?, true);
            table.add_row(vec![
                t.row.to_string(),
                t.name.clone(),
                t.group.to_string(),
                t.genre.clone().unwrap_or_default(),
                avg,
                if t.archived { "archived" } else { "active" }.to_string(),
            ]);
        }
        table.fit();

        for (i, line) in table.render().lines().enumerate() {
            let archived = i > 0 && tasks.get(i - 1).is_some_and(|t| t.archived);
            if archived {
                println!("{GREY}{line}{RESET}");
            } else {
                println!("{}", line);
            }
        }
    }
    Ok(())
}
