//! Habit entries: one logged outcome per calendar day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome logged for a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitStatus {
    Completed,
    Missed,
}

impl HabitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitStatus::Completed => "completed",
            HabitStatus::Missed => "missed",
        }
    }

    /// Single-character marker used in listings
    pub fn symbol(&self) -> char {
        match self {
            HabitStatus::Completed => '✓',
            HabitStatus::Missed => '✕',
        }
    }
}

impl fmt::Display for HabitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HabitStatus {
    /// Exact stored spelling only, the same values `data.json` accepts.
    pub fn from_stored(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(HabitStatus::Completed),
            "missed" => Some(HabitStatus::Missed),
            _ => None,
        }
    }
}

/// A single logged day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitEntry {
    pub date: NaiveDate,
    pub status: HabitStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl HabitEntry {
    /// Create an entry. Blank notes are dropped.
    pub fn new(date: NaiveDate, status: HabitStatus, notes: Option<String>) -> Self {
        HabitEntry {
            date,
            status,
            notes: normalize_notes(notes),
        }
    }

    pub fn completed(date: NaiveDate) -> Self {
        HabitEntry::new(date, HabitStatus::Completed, None)
    }

    pub fn missed(date: NaiveDate) -> Self {
        HabitEntry::new(date, HabitStatus::Missed, None)
    }

    pub fn is_completed(&self) -> bool {
        self.status == HabitStatus::Completed
    }
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes.filter(|n| !n.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_from_stored() {
        assert_eq!(
            HabitStatus::from_stored("completed"),
            Some(HabitStatus::Completed)
        );
        assert_eq!(HabitStatus::from_stored("missed"), Some(HabitStatus::Missed));
        for loose in ["Completed", " missed", "done", "miss", "skipped", ""] {
            assert_eq!(HabitStatus::from_stored(loose), None, "{:?}", loose);
        }
    }

    #[test]
    fn test_blank_notes_are_dropped() {
        let entry = HabitEntry::new(
            day(2024, 1, 1),
            HabitStatus::Completed,
            Some("   ".to_string()),
        );
        assert_eq!(entry.notes, None);

        let entry = HabitEntry::new(
            day(2024, 1, 1),
            HabitStatus::Completed,
            Some("ran 5k".to_string()),
        );
        assert_eq!(entry.notes.as_deref(), Some("ran 5k"));
    }

    #[test]
    fn test_serialized_shape() {
        let entry = HabitEntry::completed(day(2024, 2, 29));
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"date":"2024-02-29","status":"completed"}"#);

        let with_notes = HabitEntry::new(
            day(2024, 3, 1),
            HabitStatus::Missed,
            Some("sick".to_string()),
        );
        let json = serde_json::to_string(&with_notes).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2024-03-01","status":"missed","notes":"sick"}"#
        );
    }
}
