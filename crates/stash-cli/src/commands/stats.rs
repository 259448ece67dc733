use std::path::PathBuf;

use clap::Args;
use stash_core::{AchievementNotifier, Config, History, StatsSummary};

#[derive(Args)]
pub struct StatsArgs {
    /// History file (JSON array of saved songs)
    #[arg(long)]
    history: PathBuf,
    /// Evaluate as of this instant (RFC 3339) instead of now
    #[arg(long)]
    now: Option<String>,
}

pub fn run(args: StatsArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let now = super::resolve_now(args.now.as_deref())?;
    let history = History::load(&args.history)?;
    let stats = StatsSummary::from_history(
        &history,
        now,
        &config.calculator()?,
        &AchievementNotifier::new(),
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
