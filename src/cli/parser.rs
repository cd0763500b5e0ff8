use crate::models::period::Cohort;
use clap::{Parser, Subcommand};

/// Parse the loose boolean spellings accepted on the command line.
pub fn parse_bool(s: &str) -> Result<bool, String> {
    match s {
        "true" | "True" | "T" | "t" | "1" => Ok(true),
        "false" | "False" | "f" | "F" | "0" => Ok(false),
        other => Err(format!("value `{}` is not of type bool.", other)),
    }
}

/// Command-line interface definition for rTaskLedger
/// Syncs a daily time-tracking sheet into SQLite and writes averages back
#[derive(Parser)]
#[command(
    name = "rtaskledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sync a daily time-tracking sheet into SQLite and write calendar-aligned averages back",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use a local CSV file as the sheet instead of the configured one
    #[arg(global = true, long = "csv", value_name = "FILE")]
    pub csv: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Run the daily synchronization
    Sync {
        /// Record durations for today (true) or yesterday (false)
        #[arg(
            short = 't',
            long = "today",
            value_parser = parse_bool,
            action = clap::ArgAction::Set,
            default_value = "True",
            value_name = "BOOL"
        )]
        today: bool,
    },

    /// Print the cohort averages without touching the sheet
    Report {
        /// Only this cohort
        #[arg(long, value_enum)]
        cohort: Option<Cohort>,

        /// List every complete week and month used by the averages
        #[arg(long)]
        breakdown: bool,
    },

    /// List tracked tasks
    Tasks {
        /// Include archived tasks
        #[arg(long)]
        all: bool,
    },

    /// List entries recorded on a date
    Entries {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
