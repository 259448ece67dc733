//! # Stash Core Library
//!
//! Business logic for Stash, the save-for-later music app. Users stash songs
//! they hear on social and video platforms; this crate turns the resulting
//! history into the numbers the app shows back to them.
//!
//! ## Architecture
//!
//! - **Streaks**: a pure function of the history and an injected clock,
//!   recomputed on demand with no cached state
//! - **Achievements**: save-count thresholds, with announcement flags kept in
//!   a caller-supplied store
//! - **Storage**: TOML configuration and the data directory
//!
//! ## Key Components
//!
//! - [`compute_streak`] / [`StreakCalculator`]: consecutive-day streaks
//! - [`AchievementNotifier`]: progress and unlock announcements
//! - [`StatsSummary`]: everything the stats screen needs at once
//! - [`Config`]: application configuration management

pub mod achievements;
pub mod error;
pub mod history;
pub mod stats;
pub mod storage;
pub mod streak;

pub use achievements::{
    Achievement, AchievementNotifier, AchievementProgress, AchievementStore,
    FileAchievementStore, MemoryAchievementStore, ACHIEVEMENTS,
};
pub use error::{ConfigError, CoreError, HistoryError, Result, ValidationError};
pub use history::{History, SavedSong, Timestamped};
pub use stats::StatsSummary;
pub use storage::Config;
pub use streak::{compute_streak, StreakCalculator, StreakSummary};
