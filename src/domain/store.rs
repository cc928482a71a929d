//! Entry store: the set of logged days, unique per date

use crate::domain::entry::HabitEntry;
use crate::error::{HabitError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Counts reported by [`EntryStore::merge`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub inserted: usize,
    pub overwritten: usize,
}

/// Holds at most one entry per date, always ordered by ascending date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStore {
    entries: BTreeMap<NaiveDate, HabitEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        EntryStore::default()
    }

    /// Build a store from persisted entries. Later duplicates win.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = HabitEntry>,
    {
        let mut store = EntryStore::new();
        store.merge(entries);
        store
    }

    /// Insert a new entry. Fails without touching the store if the date is
    /// already logged.
    pub fn add(&mut self, entry: HabitEntry) -> Result<()> {
        if self.entries.contains_key(&entry.date) {
            return Err(HabitError::DuplicateDate(entry.date));
        }
        debug!(date = %entry.date, status = %entry.status, "adding entry");
        self.entries.insert(entry.date, entry);
        Ok(())
    }

    /// Fold imported entries in, replacing any entry on the same date.
    pub fn merge<I>(&mut self, imported: I) -> MergeSummary
    where
        I: IntoIterator<Item = HabitEntry>,
    {
        let mut summary = MergeSummary::default();
        for entry in imported {
            match self.entries.insert(entry.date, entry) {
                Some(_) => summary.overwritten += 1,
                None => summary.inserted += 1,
            }
        }
        debug!(
            inserted = summary.inserted,
            overwritten = summary.overwritten,
            "merged entries"
        );
        summary
    }

    /// Current entries in ascending date order
    pub fn snapshot(&self) -> Vec<HabitEntry> {
        self.entries.values().cloned().collect()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&HabitEntry> {
        self.entries.get(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::HabitStatus;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dates(store: &EntryStore) -> Vec<NaiveDate> {
        store.snapshot().iter().map(|e| e.date).collect()
    }

    #[test]
    fn test_add_keeps_ascending_order() {
        let mut store = EntryStore::new();
        store.add(HabitEntry::completed(day(2024, 1, 3))).unwrap();
        store.add(HabitEntry::completed(day(2024, 1, 1))).unwrap();
        store.add(HabitEntry::missed(day(2024, 1, 2))).unwrap();

        assert_eq!(
            dates(&store),
            vec![day(2024, 1, 1), day(2024, 1, 2), day(2024, 1, 3)]
        );
    }

    #[test]
    fn test_add_duplicate_date_fails_without_change() {
        let mut store = EntryStore::new();
        store.add(HabitEntry::completed(day(2024, 1, 1))).unwrap();

        let result = store.add(HabitEntry::missed(day(2024, 1, 1)));
        match result {
            Err(HabitError::DuplicateDate(d)) => assert_eq!(d, day(2024, 1, 1)),
            other => panic!("Expected DuplicateDate error, got {:?}", other),
        }

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(day(2024, 1, 1)).unwrap().status,
            HabitStatus::Completed
        );
    }

    #[test]
    fn test_merge_overwrites_same_date() {
        let mut store = EntryStore::new();
        store.add(HabitEntry::completed(day(2024, 1, 1))).unwrap();

        let summary = store.merge(vec![
            HabitEntry::missed(day(2024, 1, 1)),
            HabitEntry::completed(day(2023, 12, 31)),
        ]);

        assert_eq!(
            summary,
            MergeSummary {
                inserted: 1,
                overwritten: 1
            }
        );
        assert_eq!(dates(&store), vec![day(2023, 12, 31), day(2024, 1, 1)]);
        assert_eq!(
            store.get(day(2024, 1, 1)).unwrap().status,
            HabitStatus::Missed
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut base = EntryStore::new();
        base.add(HabitEntry::completed(day(2024, 1, 1))).unwrap();
        base.add(HabitEntry::completed(day(2024, 1, 5))).unwrap();

        let import = vec![
            HabitEntry::missed(day(2024, 1, 1)),
            HabitEntry::new(
                day(2024, 1, 2),
                HabitStatus::Completed,
                Some("back on track".to_string()),
            ),
        ];

        let mut once = base.clone();
        once.merge(import.clone());
        let mut twice = once.clone();
        twice.merge(import);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_empty_input() {
        let mut store = EntryStore::new();
        store.add(HabitEntry::completed(day(2024, 1, 1))).unwrap();

        let summary = store.merge(Vec::new());
        assert_eq!(summary, MergeSummary::default());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_from_entries_deduplicates() {
        let store = EntryStore::from_entries(vec![
            HabitEntry::completed(day(2024, 1, 2)),
            HabitEntry::completed(day(2024, 1, 1)),
            HabitEntry::missed(day(2024, 1, 2)),
        ]);

        assert_eq!(dates(&store), vec![day(2024, 1, 1), day(2024, 1, 2)]);
        assert!(!store.get(day(2024, 1, 2)).unwrap().is_completed());
    }
}
