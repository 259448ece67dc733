//! Save-count achievements.
//!
//! Achievements unlock when the total number of stashed songs reaches a
//! target. Whether an unlock has already been announced is kept in an
//! [`AchievementStore`] supplied by the caller, so the decision logic does not
//! depend on where the flags live.

mod store;

pub use store::{AchievementStore, FileAchievementStore, MemoryAchievementStore};

use serde::Serialize;

use crate::error::Result;

/// A threshold achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Number of saved songs needed to unlock.
    pub target: u32,
}

/// Built-in achievements in the order they are worked towards.
pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first-stash",
        title: "First Stash!",
        description: "You stashed your first song!",
        target: 1,
    },
    Achievement {
        id: "collector",
        title: "Collector",
        description: "Stash 10 songs",
        target: 10,
    },
    Achievement {
        id: "music-lover",
        title: "Music Lover",
        description: "Stash 25 songs",
        target: 25,
    },
    Achievement {
        id: "curator",
        title: "Curator",
        description: "Stash 50 songs",
        target: 50,
    },
];

/// Progress of one achievement at a given save count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementProgress {
    #[serde(flatten)]
    pub achievement: Achievement,
    /// Save count capped at the target.
    pub progress: u32,
    pub completed: bool,
    /// `progress / target` as a rounded percentage, 0..=100.
    pub percent: u32,
}

impl AchievementProgress {
    pub fn new(achievement: Achievement, total: usize) -> Self {
        let target = achievement.target;
        let progress = u32::try_from(total).unwrap_or(u32::MAX).min(target);
        Self {
            achievement,
            progress,
            completed: total >= target as usize,
            percent: rounded_percent(progress, target),
        }
    }
}

// Rounds half up, matching how the progress bar label is displayed.
fn rounded_percent(progress: u32, target: u32) -> u32 {
    if target == 0 {
        return 100;
    }
    let (p, t) = (u64::from(progress), u64::from(target));
    ((p * 200 + t) / (2 * t)) as u32
}

/// Decides which achievements are unlocked and which still need announcing.
#[derive(Debug, Clone, Copy)]
pub struct AchievementNotifier {
    definitions: &'static [Achievement],
}

impl Default for AchievementNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementNotifier {
    pub fn new() -> Self {
        Self {
            definitions: ACHIEVEMENTS,
        }
    }

    pub fn with_definitions(definitions: &'static [Achievement]) -> Self {
        Self { definitions }
    }

    pub fn definitions(&self) -> &'static [Achievement] {
        self.definitions
    }

    /// Progress for every achievement at `total` saved songs.
    pub fn progress(&self, total: usize) -> Vec<AchievementProgress> {
        self.definitions
            .iter()
            .map(|a| AchievementProgress::new(*a, total))
            .collect()
    }

    /// The first achievement not yet completed, if any.
    pub fn next_achievement(&self, total: usize) -> Option<AchievementProgress> {
        self.definitions
            .iter()
            .map(|a| AchievementProgress::new(*a, total))
            .find(|p| !p.completed)
    }

    /// Return the first completed achievement that has not been announced,
    /// marking it announced before returning.
    ///
    /// A second call with the same total yields the next pending unlock, or
    /// `None` once everything completed has been announced.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`AchievementStore::set`]; the achievement is
    /// not returned if it could not be marked.
    pub fn check<S>(&self, total: usize, store: &mut S) -> Result<Option<Achievement>>
    where
        S: AchievementStore + ?Sized,
    {
        let pending = self
            .definitions
            .iter()
            .find(|a| total >= a.target as usize && !store.has(a.id));

        match pending {
            Some(achievement) => {
                store.set(achievement.id)?;
                tracing::info!(id = achievement.id, total, "achievement unlocked");
                Ok(Some(*achievement))
            }
            None => Ok(None),
        }
    }

    /// Announce every pending unlock at once, in definition order.
    ///
    /// # Errors
    ///
    /// Stops at the first store failure.
    pub fn check_all<S>(&self, total: usize, store: &mut S) -> Result<Vec<Achievement>>
    where
        S: AchievementStore + ?Sized,
    {
        let mut unlocked = Vec::new();
        while let Some(achievement) = self.check(total, store)? {
            unlocked.push(achievement);
        }
        Ok(unlocked)
    }
}
