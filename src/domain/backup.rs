//! Backup documents and the import merge resolver

use crate::domain::day_ref::iso_date;
use crate::domain::entry::{HabitEntry, HabitStatus};
use crate::domain::goal::Goal;
use crate::domain::store::EntryStore;
use crate::error::{HabitError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// On-disk and exchange shape: `{ "entries": [...], "streakGoal": n }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub entries: Vec<HabitEntry>,
    #[serde(default)]
    pub streak_goal: Goal,
}

impl BackupDocument {
    pub fn new(store: &EntryStore, goal: Goal) -> Self {
        BackupDocument {
            entries: store.snapshot(),
            streak_goal: goal,
        }
    }
}

/// An untrusted import payload that passed structural validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedImport {
    pub entries: Vec<HabitEntry>,
    pub streak_goal: Goal,
    /// Elements of `entries` lacking a usable date or status
    pub skipped: usize,
}

impl ValidatedImport {
    /// Check the payload shape. Nothing is mutated here, so a failure
    /// leaves the caller's state untouched.
    pub fn parse(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text)
            .map_err(|e| HabitError::Format(format!("not valid JSON ({})", e)))?;

        let object = root
            .as_object()
            .ok_or_else(|| HabitError::Format("expected a JSON object".to_string()))?;

        let raw_entries = object
            .get("entries")
            .and_then(Value::as_array)
            .ok_or_else(|| HabitError::Format("missing 'entries' array".to_string()))?;

        let streak_goal = object
            .get("streakGoal")
            .and_then(Value::as_f64)
            .map(Goal::from_f64)
            .ok_or_else(|| HabitError::Format("missing numeric 'streakGoal'".to_string()))?;

        let mut entries = Vec::with_capacity(raw_entries.len());
        let mut skipped = 0;
        for (index, raw) in raw_entries.iter().enumerate() {
            match entry_from_value(raw) {
                Some(entry) => entries.push(entry),
                None => {
                    warn!(index, "skipping import element without a valid date and status");
                    skipped += 1;
                }
            }
        }

        Ok(ValidatedImport {
            entries,
            streak_goal,
            skipped,
        })
    }
}

fn entry_from_value(value: &Value) -> Option<HabitEntry> {
    let date = iso_date(value.get("date")?.as_str()?)?;
    let status = HabitStatus::from_stored(value.get("status")?.as_str()?)?;
    let notes = value
        .get("notes")
        .and_then(Value::as_str)
        .map(str::to_string);
    Some(HabitEntry::new(date, status, notes))
}

/// What an applied import changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    pub overwritten: usize,
    pub skipped: usize,
    pub goal: Goal,
}

/// Result of [`import_backup`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Applied(ImportReport),
    /// The caller declined the overwrite; nothing changed
    Cancelled,
}

/// Validate `payload` and, if `proceed` is set, merge its entries into
/// `store` and replace `goal`.
///
/// Validation happens before the `proceed` check, so a malformed payload is
/// reported as a `Format` error even when the caller would have cancelled.
pub fn import_backup(
    store: &mut EntryStore,
    goal: &mut Goal,
    payload: &str,
    proceed: bool,
) -> Result<ImportOutcome> {
    let validated = ValidatedImport::parse(payload)?;
    Ok(apply_import(store, goal, validated, proceed))
}

/// Apply an already validated import.
pub fn apply_import(
    store: &mut EntryStore,
    goal: &mut Goal,
    validated: ValidatedImport,
    proceed: bool,
) -> ImportOutcome {
    if !proceed {
        info!("import cancelled");
        return ImportOutcome::Cancelled;
    }

    let summary = store.merge(validated.entries);
    *goal = validated.streak_goal;

    let report = ImportReport {
        inserted: summary.inserted,
        overwritten: summary.overwritten,
        skipped: validated.skipped,
        goal: *goal,
    };
    info!(
        inserted = report.inserted,
        overwritten = report.overwritten,
        skipped = report.skipped,
        goal = report.goal.days(),
        "import applied"
    );
    ImportOutcome::Applied(report)
}
