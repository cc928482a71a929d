//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, ExportFormat, StatusArg};
pub use output::{format_entry_list, format_import_outcome, format_stats, format_streak_chart};
