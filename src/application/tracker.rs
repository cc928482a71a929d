//! Habit tracker service
//!
//! Owns the entry store and goal, and writes them through a [`Storage`]
//! after every successful mutation. This is the surface the command line
//! talks to.

use crate::domain::backup::{apply_import, BackupDocument, ImportOutcome, ValidatedImport};
use crate::domain::export;
use crate::domain::{compute_statistics, EntryStore, Goal, HabitEntry, StreakStats};
use crate::error::{HabitError, Result};
use crate::infrastructure::Storage;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Single-habit tracker bound to a storage
pub struct HabitTracker<S: Storage> {
    store: EntryStore,
    goal: Goal,
    storage: S,
}

impl<S: Storage> HabitTracker<S> {
    /// Load persisted state. Empty storage yields an empty tracker; stored
    /// bytes that do not parse are a `Storage` error.
    pub fn open(storage: S) -> Result<Self> {
        let document = match storage.load()? {
            Some(bytes) => serde_json::from_slice::<BackupDocument>(&bytes).map_err(|e| {
                HabitError::Storage(format!("Stored data is corrupt: {}", e))
            })?,
            None => BackupDocument::default(),
        };

        debug!(
            entries = document.entries.len(),
            goal = document.streak_goal.days(),
            "loaded tracker state"
        );

        Ok(HabitTracker {
            store: EntryStore::from_entries(document.entries),
            goal: document.streak_goal,
            storage,
        })
    }

    pub fn entries(&self) -> &EntryStore {
        &self.store
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// Log a new day. Days after `today` and already logged days are
    /// rejected before anything changes.
    pub fn add_entry(&mut self, entry: HabitEntry, today: NaiveDate) -> Result<()> {
        if entry.date > today {
            return Err(HabitError::FutureDate(entry.date));
        }
        self.store.add(entry)?;
        self.persist()
    }

    /// Derive all statistics as of `today`.
    pub fn statistics(&self, today: NaiveDate) -> StreakStats {
        compute_statistics(&self.store.snapshot(), self.goal, today)
    }

    pub fn set_goal(&mut self, goal: Goal) -> Result<Goal> {
        self.goal = goal;
        self.persist()?;
        Ok(goal)
    }

    /// Validate and, when `proceed` is set, merge a backup payload.
    pub fn import_backup(&mut self, payload: &str, proceed: bool) -> Result<ImportOutcome> {
        let validated = ValidatedImport::parse(payload)?;
        self.apply_import(validated, proceed)
    }

    /// Merge a payload validated earlier, e.g. before asking for confirmation.
    pub fn apply_import(
        &mut self,
        validated: ValidatedImport,
        proceed: bool,
    ) -> Result<ImportOutcome> {
        let outcome = apply_import(&mut self.store, &mut self.goal, validated, proceed);
        if let ImportOutcome::Applied(_) = outcome {
            self.persist()?;
        }
        Ok(outcome)
    }

    pub fn export_json(&self) -> Result<String> {
        export::to_json(&self.document())
    }

    pub fn export_entries_csv(&self) -> String {
        export::entries_to_csv(&self.store.snapshot())
    }

    pub fn export_streaks_csv(&self, today: NaiveDate) -> String {
        export::streaks_to_csv(&self.statistics(today).streak_history)
    }

    fn document(&self) -> BackupDocument {
        BackupDocument::new(&self.store, self.goal)
    }

    /// Write current state. On failure the in-memory state is kept and the
    /// error is returned to the caller.
    fn persist(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.document())
            .map_err(|e| HabitError::Storage(format!("Failed to serialize data: {}", e)))?;
        self.storage.save(&bytes).inspect_err(|e| {
            warn!(error = %e, "failed to persist tracker state");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HabitStatus, Streak};
    use crate::infrastructure::MemoryStorage;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tracker() -> HabitTracker<MemoryStorage> {
        HabitTracker::open(MemoryStorage::new()).unwrap()
    }

    #[test]
    fn test_open_empty_storage() {
        let tracker = tracker();
        assert!(tracker.entries().is_empty());
        assert_eq!(tracker.goal(), Goal::UNSET);
    }

    #[test]
    fn test_open_corrupt_storage_fails() {
        let storage = MemoryStorage::with_bytes(b"{not json".to_vec());
        assert!(matches!(
            HabitTracker::open(storage),
            Err(HabitError::Storage(_))
        ));
    }

    #[test]
    fn test_add_entry_persists() {
        let mut tracker = tracker();
        tracker
            .add_entry(HabitEntry::completed(day(2024, 1, 1)), day(2024, 1, 1))
            .unwrap();

        let saved = tracker.storage.contents().unwrap();
        let reopened = HabitTracker::open(MemoryStorage::with_bytes(saved)).unwrap();
        assert_eq!(reopened.entries().snapshot(), tracker.entries().snapshot());
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut tracker = tracker();
        let today = day(2024, 1, 1);
        tracker
            .add_entry(HabitEntry::completed(today), today)
            .unwrap();

        let result = tracker.add_entry(HabitEntry::missed(today), today);
        assert!(matches!(result, Err(HabitError::DuplicateDate(_))));
        assert_eq!(
            tracker.entries().get(today).unwrap().status,
            HabitStatus::Completed
        );
    }

    #[test]
    fn test_add_future_date_rejected() {
        let mut tracker = tracker();
        let result = tracker.add_entry(HabitEntry::completed(day(2024, 1, 2)), day(2024, 1, 1));

        assert!(matches!(result, Err(HabitError::FutureDate(_))));
        assert!(tracker.entries().is_empty());
    }

    #[test]
    fn test_storage_failure_keeps_in_memory_state() {
        let mut tracker = HabitTracker::open(MemoryStorage::read_only()).unwrap();
        let today = day(2024, 1, 1);

        let result = tracker.add_entry(HabitEntry::completed(today), today);
        assert!(matches!(result, Err(HabitError::Storage(_))));

        // The computation layer keeps working on the in-memory state
        assert_eq!(tracker.entries().len(), 1);
        assert_eq!(tracker.statistics(today).current_streak, 1);
    }

    #[test]
    fn test_statistics_follow_entries_and_goal() {
        let mut tracker = tracker();
        let today = day(2024, 1, 3);
        for d in 1..=3 {
            tracker
                .add_entry(HabitEntry::completed(day(2024, 1, d)), today)
                .unwrap();
        }
        tracker.set_goal(Goal::new(3)).unwrap();

        let stats = tracker.statistics(today);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.longest_streak, 3);
        assert!(stats.is_goal_met);
        assert_eq!(stats.streak_history, vec![Streak::new(today, 3)]);
    }

    #[test]
    fn test_import_overwrites_and_sets_goal() {
        let mut tracker = tracker();
        tracker
            .add_entry(HabitEntry::completed(day(2024, 1, 1)), day(2024, 1, 1))
            .unwrap();

        let payload = r#"{"entries":[{"date":"2024-01-01","status":"missed"}],"streakGoal":4}"#;
        let outcome = tracker.import_backup(payload, true).unwrap();

        assert!(matches!(outcome, ImportOutcome::Applied(_)));
        assert_eq!(
            tracker.entries().snapshot(),
            vec![HabitEntry::missed(day(2024, 1, 1))]
        );
        assert_eq!(tracker.goal(), Goal::new(4));

        let reopened =
            HabitTracker::open(MemoryStorage::with_bytes(tracker.storage.contents().unwrap()))
                .unwrap();
        assert_eq!(reopened.goal(), Goal::new(4));
    }

    #[test]
    fn test_cancelled_import_does_not_persist() {
        let mut tracker = tracker();
        let payload = r#"{"entries":[{"date":"2024-01-01","status":"missed"}],"streakGoal":4}"#;

        let outcome = tracker.import_backup(payload, false).unwrap();

        assert_eq!(outcome, ImportOutcome::Cancelled);
        assert!(tracker.entries().is_empty());
        assert_eq!(tracker.storage.contents(), None);
    }

    #[test]
    fn test_exports() {
        let mut tracker = tracker();
        let today = day(2024, 1, 2);
        tracker
            .add_entry(HabitEntry::completed(day(2024, 1, 1)), today)
            .unwrap();
        tracker
            .add_entry(HabitEntry::completed(today), today)
            .unwrap();

        assert_eq!(
            tracker.export_entries_csv(),
            "date,status,notes\n2024-01-01,completed,\n2024-01-02,completed,\n"
        );
        assert_eq!(
            tracker.export_streaks_csv(today),
            "start_date,end_date,length_in_days\n2024-01-01,2024-01-02,2\n"
        );

        let json = tracker.export_json().unwrap();
        let mut other = HabitTracker::open(MemoryStorage::new()).unwrap();
        other.import_backup(&json, true).unwrap();
        assert_eq!(other.entries(), tracker.entries());
    }
}
