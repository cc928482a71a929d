//! Domain layer - Entries, streak derivation and import rules

pub mod backup;
pub mod day_ref;
pub mod entry;
pub mod export;
pub mod goal;
pub mod store;
pub mod streak;

pub use backup::{import_backup, BackupDocument, ImportOutcome, ImportReport, ValidatedImport};
pub use day_ref::DayReference;
pub use entry::{HabitEntry, HabitStatus};
pub use goal::Goal;
pub use store::{EntryStore, MergeSummary};
pub use streak::{compute_statistics, Streak, StreakStats};
