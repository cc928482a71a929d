//! Streak goal

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target streak length. Zero means no goal is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Goal(u32);

impl Goal {
    pub const UNSET: Goal = Goal(0);

    pub fn new(days: u32) -> Self {
        Goal(days)
    }

    /// Normalize any number to a goal: floor, then clamp to `0..=u32::MAX`.
    /// NaN becomes zero.
    pub fn from_f64(value: f64) -> Self {
        // `as` saturates and maps NaN to 0
        Goal(value.floor().max(0.0) as u32)
    }

    /// Normalize user text to a goal. Text that is not a number becomes zero.
    pub fn from_input(input: &str) -> Self {
        input
            .trim()
            .parse::<f64>()
            .map(Goal::from_f64)
            .unwrap_or(Goal::UNSET)
    }

    pub fn days(&self) -> u32 {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0 > 0
    }

    pub fn is_met(&self, current_streak: u32) -> bool {
        self.is_set() && current_streak >= self.0
    }

    /// Fraction of the goal reached, capped at 1.0. `None` when unset.
    pub fn progress(&self, current_streak: u32) -> Option<f64> {
        if !self.is_set() {
            return None;
        }
        Some((f64::from(current_streak) / f64::from(self.0)).min(1.0))
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_set() {
            write!(f, "{} days", self.0)
        } else {
            f.write_str("not set")
        }
    }
}
