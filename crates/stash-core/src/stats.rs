//! Stats screen summary.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::achievements::{AchievementNotifier, AchievementProgress};
use crate::history::History;
use crate::streak::{StreakCalculator, StreakSummary};

/// Everything the stats screen shows for one history snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub total_songs: usize,
    pub streak: StreakSummary,
    /// Achievement currently being worked towards, if any remain.
    pub next_achievement: Option<AchievementProgress>,
}

impl StatsSummary {
    pub fn from_history(
        history: &History,
        now: DateTime<Utc>,
        calculator: &StreakCalculator,
        notifier: &AchievementNotifier,
    ) -> Self {
        Self {
            total_songs: history.len(),
            streak: calculator.summarize(history, now),
            next_achievement: notifier.next_achievement(history.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::SavedSong;
    use chrono::TimeZone;

    #[test]
    fn summary_for_small_history() {
        let history = History::new(vec![
            SavedSong::at("1", "2024-03-01T10:00:00Z"),
            SavedSong::at("2", "2024-03-02T10:00:00Z"),
            SavedSong::at("3", "2024-03-02T21:00:00Z"),
            SavedSong::default(),
        ]);
        let now = Utc.with_ymd_and_hms(2024, 3, 3, 8, 0, 0).unwrap();
        let stats = StatsSummary::from_history(
            &history,
            now,
            &StreakCalculator::new(),
            &AchievementNotifier::new(),
        );

        assert_eq!(stats.total_songs, 4);
        assert_eq!(stats.streak.current, 2);
        assert_eq!(stats.streak.skipped, 1);
        let next = stats.next_achievement.unwrap();
        assert_eq!(next.achievement.id, "collector");
        assert_eq!(next.percent, 40);
    }
}
