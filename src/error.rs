//! Error types for habitlog

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for habitlog
#[derive(Debug, Error)]
pub enum HabitError {
    #[error("An entry for {0} already exists")]
    DuplicateDate(NaiveDate),

    #[error("Cannot log {0}: the date is in the future")]
    FutureDate(NaiveDate),

    #[error("Invalid backup format: {0}")]
    Format(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid day reference: {0}")]
    InvalidDayReference(String),

    #[error("Not a habitlog directory: {0}")]
    NotHabitDirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HabitError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            HabitError::NotHabitDirectory(_) => 2,
            HabitError::InvalidDayReference(_) | HabitError::FutureDate(_) => 3,
            HabitError::DuplicateDate(_) => 4,
            HabitError::Format(_) => 5,
            HabitError::Storage(_) => 6,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            HabitError::NotHabitDirectory(path) => {
                format!(
                    "Not a habitlog directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'habitlog init' in this directory to start tracking\n\
                    • Navigate to an existing habitlog directory\n\
                    • Set HABITLOG_ROOT environment variable to your tracker path",
                    path.display()
                )
            }
            HabitError::DuplicateDate(date) => {
                format!(
                    "An entry for {} already exists.\n\n\
                    Entries cannot be edited once logged. To replace one, export a backup,\n\
                    change the entry and import it again:\n\
                    habitlog export --output backup.json\n\
                    habitlog import backup.json",
                    date
                )
            }
            HabitError::InvalidDayReference(input) => {
                format!(
                    "Invalid day reference: '{}'\n\n\
                    Valid day references:\n\
                    • today, yesterday\n\
                    • 3 days ago\n\
                    • monday, tuesday, ..., sunday (most recent)\n\
                    • Specific dates: YYYY-MM-DD (e.g., 2024-02-29)\n\n\
                    Examples:\n\
                    habitlog done yesterday\n\
                    habitlog miss 2024-02-29",
                    input
                )
            }
            HabitError::Format(msg) => {
                format!(
                    "Invalid backup format: {}\n\n\
                    A backup must be a JSON object such as:\n\
                    {{ \"entries\": [{{ \"date\": \"2024-01-01\", \"status\": \"completed\" }}], \"streakGoal\": 7 }}",
                    msg
                )
            }
            HabitError::Storage(msg) => {
                format!(
                    "Storage error: {}\n\n\
                    Check that .habitlog/data.json is readable, writable and valid JSON.\n\
                    A failed save does not undo the change shown by this command.",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using HabitError
pub type Result<T> = std::result::Result<T, HabitError>;
