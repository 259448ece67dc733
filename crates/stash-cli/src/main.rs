use clap::{Parser, Subcommand};
use stash_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "stash-cli", version, about = "Stash CLI")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current listening streak
    Streak(commands::streak::StreakArgs),
    /// Stats screen summary as JSON
    Stats(commands::stats::StatsArgs),
    /// Achievement progress and unlocks
    Achievements {
        #[command(subcommand)]
        action: commands::achievements::AchievementsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

/// Logs go to stderr so JSON on stdout stays parseable. `STASH_LOG` takes
/// precedence over the configured level; without a usable config the level
/// is `warn`.
fn init_tracing(config: Option<&Config>) {
    let level = config.map_or("warn", |c| c.log_level.as_str());
    let filter = EnvFilter::try_from_env("STASH_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load();
    init_tracing(config.as_ref().ok());

    // Commands that compute with the config refuse to run on a broken one
    // rather than quietly falling back to defaults.
    let result = match cli.command {
        Commands::Streak(args) => config
            .map_err(Into::into)
            .and_then(|c| commands::streak::run(args, &c)),
        Commands::Stats(args) => config
            .map_err(Into::into)
            .and_then(|c| commands::stats::run(args, &c)),
        Commands::Achievements { action } => config
            .map_err(Into::into)
            .and_then(|c| commands::achievements::run(action, &c)),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
