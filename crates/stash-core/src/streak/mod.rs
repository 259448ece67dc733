//! Listening streaks.
//!
//! A streak is the number of consecutive calendar days, ending today or
//! yesterday, on which the user stashed at least one song.

mod calculator;
pub mod calendar;

pub use calculator::{CoveredDays, StreakCalculator, StreakSummary, MAX_OFFSET_MINUTES};
pub use calendar::{calendar_day, parse_timestamp};

use chrono::{DateTime, Utc};

use crate::history::Timestamped;

/// Current streak with calendar days taken in UTC.
///
/// Records with a missing or malformed timestamp are ignored. Never fails;
/// the worst case is 0.
pub fn compute_streak<I>(events: I, now: DateTime<Utc>) -> u32
where
    I: IntoIterator,
    I::Item: Timestamped,
{
    StreakCalculator::new().current_streak(events, now)
}
