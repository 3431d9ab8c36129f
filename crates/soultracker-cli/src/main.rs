use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "soultracker", version, about = "SoulTracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management
    User {
        #[command(subcommand)]
        action: commands::user::UserAction,
    },
    /// Daily check-in for a user
    Checkin(commands::checkin::CheckinArgs),
    /// Classify text without touching any account
    Classify(commands::classify::ClassifyArgs),
    /// Mood logging and summaries
    Mood {
        #[command(subcommand)]
        action: commands::mood::MoodAction,
    },
    /// Mood booster rewards
    Booster {
        #[command(subcommand)]
        action: commands::booster::BoosterAction,
    },
    /// Points leaderboard as seen by a user
    Leaderboard(commands::leaderboard::LeaderboardArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::User { .. } => "user",
            Commands::Checkin(_) => "checkin",
            Commands::Classify(_) => "classify",
            Commands::Mood { .. } => "mood",
            Commands::Booster { .. } => "booster",
            Commands::Leaderboard(_) => "leaderboard",
            Commands::Config { .. } => "config",
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(command = cli.command.name(), "dispatching command");
    let result = match cli.command {
        Commands::User { action } => commands::user::run(action),
        Commands::Checkin(args) => commands::checkin::run(args),
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Mood { action } => commands::mood::run(action),
        Commands::Booster { action } => commands::booster::run(action),
        Commands::Leaderboard(args) => commands::leaderboard::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
