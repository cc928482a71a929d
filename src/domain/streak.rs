//! Streak derivation
//!
//! Everything here is a pure function of an entry snapshot and an injected
//! `today`. Statistics are recomputed from scratch on each call.
//!
//! Two scans are used and they treat an unlogged `today` differently:
//!
//! - the forward history walk counts every unlogged day, today included,
//!   as a gap that closes the running streak;
//! - the backward current-streak scan skips an unlogged today and starts
//!   counting from yesterday, so a streak stays alive until the day is over.

use crate::domain::entry::{HabitEntry, HabitStatus};
use crate::domain::goal::Goal;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// One maximal run of consecutive completed days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    /// Last completed day of the run
    pub end_date: NaiveDate,
    pub length: u32,
}

impl Streak {
    pub fn new(end_date: NaiveDate, length: u32) -> Self {
        Streak { end_date, length }
    }

    /// First completed day of the run
    pub fn start_date(&self) -> NaiveDate {
        self.end_date - Duration::days(i64::from(self.length.saturating_sub(1)))
    }
}

/// Statistics derived from the entry collection, a goal and today's date
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub streak_history: Vec<Streak>,
    pub is_goal_met: bool,
    pub goal: Goal,
    pub goal_progress: Option<f64>,
}

/// Compute every statistic for `entries` as of `today`.
pub fn compute_statistics(entries: &[HabitEntry], goal: Goal, today: NaiveDate) -> StreakStats {
    let statuses = status_by_date(entries);

    let streak_history = history_from(&statuses, first_date(entries), today);
    let longest_streak = streak_history.iter().map(|s| s.length).max().unwrap_or(0);
    let current_streak = current_streak_from(&statuses, today);

    debug!(
        today = %today,
        entries = entries.len(),
        current_streak,
        longest_streak,
        streaks = streak_history.len(),
        "derived statistics"
    );

    StreakStats {
        current_streak,
        longest_streak,
        streak_history,
        is_goal_met: goal.is_met(current_streak),
        goal,
        goal_progress: goal.progress(current_streak),
    }
}

/// All completed runs from the first entry up to and including `today`,
/// in chronological order.
pub fn streak_history(entries: &[HabitEntry], today: NaiveDate) -> Vec<Streak> {
    history_from(&status_by_date(entries), first_date(entries), today)
}

/// Length of the run still active as of today, or as of yesterday when
/// today has not been logged yet.
pub fn current_streak(entries: &[HabitEntry], today: NaiveDate) -> u32 {
    current_streak_from(&status_by_date(entries), today)
}

fn status_by_date(entries: &[HabitEntry]) -> HashMap<NaiveDate, HabitStatus> {
    entries.iter().map(|e| (e.date, e.status)).collect()
}

fn first_date(entries: &[HabitEntry]) -> Option<NaiveDate> {
    entries.iter().map(|e| e.date).min()
}

fn history_from(
    statuses: &HashMap<NaiveDate, HabitStatus>,
    start: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<Streak> {
    let Some(start) = start else {
        return Vec::new();
    };

    let mut history = Vec::new();
    let mut run_length = 0u32;
    let mut run_end: Option<NaiveDate> = None;

    for day in start.iter_days().take_while(|d| *d <= today) {
        if statuses.get(&day) == Some(&HabitStatus::Completed) {
            run_length += 1;
            run_end = Some(day);
        } else {
            // Missed and unlogged days both end the run
            if let Some(end) = run_end.take() {
                history.push(Streak::new(end, run_length));
            }
            run_length = 0;
        }
    }

    // A run reaching today never saw a breaking day
    if let Some(end) = run_end {
        history.push(Streak::new(end, run_length));
    }

    history
}

fn current_streak_from(statuses: &HashMap<NaiveDate, HabitStatus>, today: NaiveDate) -> u32 {
    let mut cursor = if statuses.contains_key(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };

    let mut count = 0;
    while let Some(day) = cursor {
        if statuses.get(&day) != Some(&HabitStatus::Completed) {
            break;
        }
        count += 1;
        cursor = day.pred_opt();
    }
    count
}
