//! Consecutive-day streak over a saved-song history.
//!
//! The streak is recomputed from the full history on every call. Nothing is
//! cached, so there is no streak state that can go stale.

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use super::calendar::{calendar_day, day_of};
use crate::error::ValidationError;
use crate::history::Timestamped;

/// Largest offset, in minutes, a fixed calendar zone may have.
pub const MAX_OFFSET_MINUTES: i32 = 23 * 60 + 59;

/// Distinct calendar days covered by a history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoveredDays {
    days: BTreeSet<NaiveDate>,
    skipped: usize,
}

impl CoveredDays {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    /// Number of distinct days with at least one event.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Events dropped because their timestamp was missing or unparsable.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn latest(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    /// Current streak relative to `today`.
    ///
    /// Anchors on `today` if covered, else on the day before (the grace
    /// window), else the streak is 0. Walks backward one day at a time from
    /// the anchor, so the cost is bounded by the run length.
    pub fn streak_ending(&self, today: NaiveDate) -> u32 {
        let anchor = if self.contains(today) {
            today
        } else {
            match today.pred_opt() {
                Some(yesterday) if self.contains(yesterday) => yesterday,
                _ => return 0,
            }
        };

        let mut streak = 0;
        let mut cursor = Some(anchor);
        while let Some(day) = cursor {
            if !self.contains(day) {
                break;
            }
            streak += 1;
            cursor = day.pred_opt();
        }
        streak
    }

    /// Longest run of consecutive covered days anywhere in the history.
    pub fn longest_run(&self) -> u32 {
        let mut longest = 0;
        let mut run = 0;
        let mut previous: Option<NaiveDate> = None;

        for day in self.iter() {
            run = match previous.and_then(|p| p.succ_opt()) {
                Some(next) if next == day => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            previous = Some(day);
        }
        longest
    }
}

/// Streak figures shown on the stats screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Consecutive days ending today (or yesterday).
    pub current: u32,
    /// Longest consecutive run in the whole history.
    pub longest: u32,
    /// Distinct days with at least one saved song.
    pub active_days: usize,
    pub last_active_day: Option<NaiveDate>,
    /// Records ignored for lack of a usable timestamp.
    pub skipped: usize,
}

/// Computes streaks with calendar days taken in a fixed reference zone.
///
/// The default zone is UTC, which keeps the result independent of the host
/// the code runs on. Users near midnight in other zones will see days split
/// at UTC midnight unless a fixed offset is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakCalculator {
    zone: FixedOffset,
}

impl Default for StreakCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl StreakCalculator {
    /// Calculator bucketing days in UTC.
    pub fn new() -> Self {
        Self { zone: Utc.fix() }
    }

    pub fn with_zone(zone: FixedOffset) -> Self {
        Self { zone }
    }

    /// Calculator bucketing days at a fixed offset east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OffsetOutOfRange`] when `minutes` is
    /// outside `-1439..=1439`.
    pub fn with_offset_minutes(minutes: i32) -> Result<Self, ValidationError> {
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
            return Err(ValidationError::OffsetOutOfRange { minutes });
        }
        FixedOffset::east_opt(minutes * 60)
            .map(Self::with_zone)
            .ok_or(ValidationError::OffsetOutOfRange { minutes })
    }

    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    /// Today's calendar day for `now` in this calculator's zone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        day_of(now, &self.zone)
    }

    /// Bucket events into distinct calendar days.
    ///
    /// Events whose timestamp is missing or unparsable are counted as
    /// skipped and contribute no day.
    pub fn covered_days<I>(&self, events: I) -> CoveredDays
    where
        I: IntoIterator,
        I::Item: Timestamped,
    {
        let mut covered = CoveredDays::default();
        for event in events {
            match event.created_at().and_then(|raw| calendar_day(raw, &self.zone)) {
                Some(day) => {
                    covered.days.insert(day);
                }
                None => {
                    tracing::trace!(
                        created_at = ?event.created_at(),
                        "skipping record without a usable timestamp"
                    );
                    covered.skipped += 1;
                }
            }
        }
        if covered.skipped > 0 {
            tracing::debug!(
                skipped = covered.skipped,
                active_days = covered.len(),
                "ignored records with missing or malformed timestamps"
            );
        }
        covered
    }

    /// Current consecutive-day streak as of `now`.
    pub fn current_streak<I>(&self, events: I, now: DateTime<Utc>) -> u32
    where
        I: IntoIterator,
        I::Item: Timestamped,
    {
        self.covered_days(events).streak_ending(self.today(now))
    }

    /// Current and longest streak plus activity counts as of `now`.
    pub fn summarize<I>(&self, events: I, now: DateTime<Utc>) -> StreakSummary
    where
        I: IntoIterator,
        I::Item: Timestamped,
    {
        let covered = self.covered_days(events);
        let current = covered.streak_ending(self.today(now));
        let summary = StreakSummary {
            current,
            longest: covered.longest_run().max(current),
            active_days: covered.len(),
            last_active_day: covered.latest(),
            skipped: covered.skipped(),
        };
        tracing::debug!(current = summary.current, longest = summary.longest, "computed streak summary");
        summary
    }
}
