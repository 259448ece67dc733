use std::path::PathBuf;

use clap::Subcommand;
use stash_core::{AchievementNotifier, Config, FileAchievementStore, History};

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// Progress towards every achievement
    List {
        /// Number of saved songs
        #[arg(long, default_value_t = 0)]
        total: usize,
    },
    /// Announce achievements unlocked since the last check
    Check {
        /// Number of saved songs
        #[arg(long, required_unless_present = "history", conflicts_with = "history")]
        total: Option<usize>,
        /// Count saved songs from this history file instead
        #[arg(long)]
        history: Option<PathBuf>,
        /// Flag file (defaults to the configured store)
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

pub fn run(action: AchievementsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let notifier = AchievementNotifier::new();

    match action {
        AchievementsAction::List { total } => {
            let progress = notifier.progress(total);
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
        AchievementsAction::Check {
            total,
            history,
            store,
        } => {
            let total = match (total, history) {
                (Some(total), _) => total,
                (None, Some(path)) => History::load(&path)?.len(),
                (None, None) => return Err("either --total or --history is required".into()),
            };
            let store_path = match store {
                Some(path) => path,
                None => config.achievement_store_path()?,
            };
            tracing::debug!(store = %store_path.display(), total, "checking achievements");
            let mut store = FileAchievementStore::open(store_path);
            let unlocked = notifier.check_all(total, &mut store)?;
            println!("{}", serde_json::to_string_pretty(&unlocked)?);
        }
    }
    Ok(())
}
