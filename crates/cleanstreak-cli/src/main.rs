use clap::{Parser, Subcommand};
use cleanstreak_core::{Config, MAX_HISTORY_DAYS};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cleanstreak-cli", version, about = "cleanstreak CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Category selection and streak control
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Daily check-in
    Checkin {
        #[command(subcommand)]
        action: commands::checkin::CheckinAction,
    },
    /// Goal management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Per-day check-in history
    History {
        /// Number of days to show, ending today
        #[arg(
            long,
            default_value = "7",
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_HISTORY_DAYS))
        )]
        days: u32,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Stay running and print progress at every local midnight
    Watch,
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_logging(&config);
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "using default configuration");
    }

    let result = match cli.command {
        Commands::Streak { action } => commands::streak::run(action, &config),
        Commands::Checkin { action } => commands::checkin::run(action, &config),
        Commands::Goal { action } => commands::goal::run(action, &config),
        Commands::History { days } => commands::history::run(days, &config),
        Commands::Config { action } => commands::config::run(action),
        Commands::Watch => commands::watch::run(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
