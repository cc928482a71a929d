//! Output formatting utilities

use crate::domain::{HabitEntry, ImportOutcome, Streak, StreakStats};

const CHART_WIDTH: u32 = 40;

fn days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

/// Format derived statistics for display
pub fn format_stats(name: &str, stats: &StreakStats) -> String {
    let mut output = format!("{}\n", name);
    output.push_str(&format!(
        "Current streak: {}\n",
        days(stats.current_streak)
    ));
    output.push_str(&format!(
        "Longest streak: {}\n",
        days(stats.longest_streak)
    ));

    match stats.goal_progress {
        Some(_) if stats.is_goal_met => {
            output.push_str(&format!("Goal: {} (reached!)\n", days(stats.goal.days())));
        }
        Some(progress) => {
            output.push_str(&format!(
                "Goal: {} ({}%, {} to go)\n",
                days(stats.goal.days()),
                (progress * 100.0).floor(),
                days(stats.goal.days() - stats.current_streak)
            ));
        }
        None => output.push_str("Goal: not set\n"),
    }

    output
}

/// Format entries newest first, optionally limited
pub fn format_entry_list(entries: &[HabitEntry], limit: Option<usize>) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    let shown = entries.iter().rev().take(limit.unwrap_or(usize::MAX));
    for entry in shown {
        output.push_str(&format!("{}  {}", entry.date, entry.status.symbol()));
        if let Some(notes) = &entry.notes {
            output.push_str(&format!("  \"{}\"", notes.replace('\n', " ")));
        }
        output.push('\n');
    }
    output
}

/// Format streak history as a horizontal bar chart, oldest first
pub fn format_streak_chart(streaks: &[Streak]) -> String {
    if streaks.is_empty() {
        return "No streak data yet".to_string();
    }

    let max = streaks.iter().map(|s| s.length).max().unwrap_or(1).max(1);
    let mut output = String::new();
    for streak in streaks {
        let width = (streak.length * CHART_WIDTH).div_ceil(max).max(1);
        output.push_str(&format!(
            "{}  {} {}\n",
            streak.end_date,
            "█".repeat(width as usize),
            streak.length
        ));
    }
    output
}

/// Summarize an import for the user
pub fn format_import_outcome(outcome: &ImportOutcome) -> String {
    match outcome {
        ImportOutcome::Cancelled => "Import cancelled".to_string(),
        ImportOutcome::Applied(report) => {
            let mut output = format!(
                "Imported {} new, {} overwritten",
                report.inserted, report.overwritten
            );
            if report.skipped > 0 {
                output.push_str(&format!(", {} skipped", report.skipped));
            }
            output.push_str(&format!("\nGoal: {}", report.goal));
            output
        }
    }
}
