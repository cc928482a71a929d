//! Day reference parsing and resolution

use crate::error::{HabitError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use std::sync::OnceLock;

fn days_ago_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,4})\s*(?:d|days?)\s+ago$").expect("valid regex"))
}

fn iso_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"))
}

/// Parse exactly `YYYY-MM-DD`: four-digit year, zero-padded month and day.
/// Chrono alone also takes signed years and unpadded fields.
pub fn iso_date(text: &str) -> Option<NaiveDate> {
    if !iso_date_regex().is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// A user-entered reference to a calendar day, resolved against today
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayReference {
    Today,
    Yesterday,
    /// A fixed number of days before today
    DaysAgo(u32),
    /// Most recent occurrence of a weekday, today included
    Weekday(Weekday),
    /// Calendar date given as YYYY-MM-DD
    Date(NaiveDate),
}

impl DayReference {
    /// Parse a day reference string
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "today" | "now" => return Ok(DayReference::Today),
            "yesterday" => return Ok(DayReference::Yesterday),
            _ => {}
        }

        if let Some(weekday) = parse_weekday(&normalized) {
            return Ok(DayReference::Weekday(weekday));
        }

        if let Some(captures) = days_ago_regex().captures(&normalized) {
            return captures[1]
                .parse()
                .map(DayReference::DaysAgo)
                .map_err(|_| HabitError::InvalidDayReference(input.to_string()));
        }

        iso_date(&normalized)
            .map(DayReference::Date)
            .ok_or_else(|| HabitError::InvalidDayReference(input.to_string()))
    }

    /// Resolve this reference to a date
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DayReference::Today => today,
            DayReference::Yesterday => today - Duration::days(1),
            DayReference::DaysAgo(n) => today - Duration::days(i64::from(*n)),
            DayReference::Weekday(target) => {
                let back = (today.weekday().num_days_from_monday() + 7
                    - target.num_days_from_monday())
                    % 7;
                today - Duration::days(i64::from(back))
            }
            DayReference::Date(date) => *date,
        }
    }
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    let weekday = match s {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

/// Parse a strict `YYYY-MM-DD` date, as used for `--today`.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    iso_date(input.trim()).ok_or_else(|| HabitError::InvalidDayReference(input.to_string()))
}
