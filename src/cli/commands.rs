//! CLI command definitions

use crate::domain::HabitStatus;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "habitlog")]
#[command(about = "Daily habit tracker with streak statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Treat this date (YYYY-MM-DD) as today. Also read from HABITLOG_TODAY
    #[arg(long, global = true, value_name = "DATE")]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new habit tracker
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Name of the habit being tracked
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Log the outcome for a day
    Log {
        /// Outcome for the day
        #[arg(value_enum, ignore_case = true)]
        status: StatusArg,

        /// Day to log (e.g., today, yesterday, 3 days ago, 2024-02-29)
        #[arg(value_name = "DAY")]
        day: Vec<String>,

        /// Optional note for the day
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Log a day as completed
    Done {
        /// Day to log (default: today)
        #[arg(value_name = "DAY")]
        day: Vec<String>,

        /// Optional note for the day
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Log a day as missed
    Miss {
        /// Day to log (default: today)
        #[arg(value_name = "DAY")]
        day: Vec<String>,

        /// Optional note for the day
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Show current and longest streak and goal progress
    Stats {
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show logged entries (newest first) and past streaks
    History {
        /// Maximum number of entries to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show or set the streak goal (0 clears it)
    Goal {
        /// New goal in days
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },

    /// Merge a JSON backup, overwriting entries on the same dates
    Import {
        /// Backup file to import
        file: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export entries as a JSON backup or CSV
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Export the streak history instead of entries (CSV only)
        #[arg(long)]
        streaks: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

/// Outcome accepted by `log`; `done` and `miss` are aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    #[value(alias = "done")]
    Completed,
    #[value(alias = "miss")]
    Missed,
}

impl From<StatusArg> for HabitStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Completed => HabitStatus::Completed,
            StatusArg::Missed => HabitStatus::Missed,
        }
    }
}
