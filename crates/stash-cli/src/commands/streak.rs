use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use stash_core::{Config, History};

#[derive(Args)]
pub struct StreakArgs {
    /// History file (JSON array of saved songs)
    #[arg(long)]
    history: PathBuf,
    /// Evaluate as of this instant (RFC 3339) instead of now
    #[arg(long)]
    now: Option<String>,
    /// Print a JSON object instead of the bare number
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct StreakOutput {
    streak: u32,
    today: chrono::NaiveDate,
    utc_offset_minutes: i32,
}

pub fn run(args: StreakArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let now = super::resolve_now(args.now.as_deref())?;
    let history = History::load(&args.history)?;
    let calculator = config.calculator()?;
    tracing::debug!(%now, songs = history.len(), "computing streak");
    let streak = calculator.current_streak(&history, now);

    if args.json {
        let output = StreakOutput {
            streak,
            today: calculator.today(now),
            utc_offset_minutes: config.streak.utc_offset_minutes,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{streak}");
    }
    Ok(())
}
