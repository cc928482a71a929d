//! JSON and CSV export

use crate::domain::backup::BackupDocument;
use crate::domain::entry::HabitEntry;
use crate::domain::streak::Streak;
use crate::error::{HabitError, Result};
use std::borrow::Cow;

/// Pretty-printed backup document, importable with `habitlog import`
pub fn to_json(document: &BackupDocument) -> Result<String> {
    serde_json::to_string_pretty(document)
        .map_err(|e| HabitError::Storage(format!("Failed to serialize backup: {}", e)))
}

/// Entries as `date,status,notes` rows
pub fn entries_to_csv(entries: &[HabitEntry]) -> String {
    let mut output = String::from("date,status,notes\n");
    for entry in entries {
        let date = entry.date.format("%Y-%m-%d").to_string();
        let notes = entry.notes.as_deref().unwrap_or("");
        push_row(&mut output, &[date.as_str(), entry.status.as_str(), notes]);
    }
    output
}

/// Streak history as `start_date,end_date,length_in_days` rows
pub fn streaks_to_csv(streaks: &[Streak]) -> String {
    let mut output = String::from("start_date,end_date,length_in_days\n");
    for streak in streaks {
        let start = streak.start_date().format("%Y-%m-%d").to_string();
        let end = streak.end_date.format("%Y-%m-%d").to_string();
        let length = streak.length.to_string();
        push_row(&mut output, &[start.as_str(), end.as_str(), length.as_str()]);
    }
    output
}

fn push_row(output: &mut String, fields: &[&str]) {
    let row: Vec<Cow<'_, str>> = fields.iter().map(|f| escape_field(f)).collect();
    output.push_str(&row.join(","));
    output.push('\n');
}

/// Quote a field containing a delimiter, quote or line break, doubling
/// any quotes inside it.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
