//! habitlog - Daily habit tracker
//!
//! Records a completed/missed outcome per day and derives streak statistics
//! (current streak, longest streak, streak history, goal progress) from the
//! logged history.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::HabitError;
