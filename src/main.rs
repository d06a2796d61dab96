//! Command line entry point for the riddle rating engine
//!
//! Rates one attempt (optionally repeated) between a player and a puzzle and
//! prints every outcome as a JSON line.

use anyhow::Result;
use clap::Parser;
use riddle_rating::config::AppConfig;
use riddle_rating::{Attempt, Inactivity, RatingEngine, RatingState};
use std::path::PathBuf;
use tracing::{error, info};

/// Riddle Rating - HSHS dual rating for players and puzzles
#[derive(Parser)]
#[command(
    name = "riddle-rating",
    version,
    about = "Rate a timed riddle attempt and print the updated player and puzzle ratings",
    long_about = "Riddle Rating scores a timed, correctness-graded attempt with the \
                 High-Speed-High-Stakes rule, compares it with the expectation implied by \
                 the rating gap, and moves both ratings by uncertainty-weighted K-factors."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without rating anything")]
    dry_run: bool,

    /// Hold uncertainty fixed
    #[arg(long, help = "Disable uncertainty decay (simulation mode)")]
    frozen: bool,

    #[arg(long, value_name = "RATING", allow_hyphen_values = true)]
    player_rating: Option<f64>,

    #[arg(long, value_name = "U")]
    player_uncertainty: Option<f64>,

    #[arg(long, value_name = "RATING", allow_hyphen_values = true)]
    puzzle_rating: Option<f64>,

    #[arg(long, value_name = "U")]
    puzzle_uncertainty: Option<f64>,

    /// Days since the player last played
    #[arg(long, value_name = "DAYS", default_value_t = 0.0)]
    player_days: f64,

    /// Days since the puzzle was last answered
    #[arg(long, value_name = "DAYS", default_value_t = 0.0)]
    puzzle_days: f64,

    /// Response time in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 0.0)]
    response_seconds: f64,

    /// Time limit in seconds (defaults to the configured limit)
    #[arg(long, value_name = "SECONDS", conflicts_with = "time_limit_minutes")]
    time_limit_seconds: Option<f64>,

    /// Time limit in minutes (defaults to the configured limit)
    #[arg(long, value_name = "MINUTES")]
    time_limit_minutes: Option<f64>,

    /// Mark the answer as incorrect
    #[arg(long)]
    incorrect: bool,

    /// Apply the same attempt this many times in a row
    #[arg(long, value_name = "N", default_value_t = 1)]
    repeat: u32,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if args.frozen {
        config.rating.frozen = true;
    }

    riddle_rating::config::validate_config(&config)?;
    Ok(config)
}

fn display_startup_banner(config: &AppConfig) {
    info!("Riddle Rating {}", riddle_rating::VERSION);
    info!("   Service: {}", config.service.name);
    info!(
        "   K: base {} amplify {} dampen {}",
        config.rating.base_k, config.rating.amplify, config.rating.dampen
    );
    info!(
        "   Uncertainty: step {} per attempt, {} per idle day, frozen {}",
        config.rating.decay_step, config.rating.inactivity_rate, config.rating.frozen
    );
    info!(
        "   Policies: negative K {:?}, epsilon {:?}",
        config.rating.negative_k_policy, config.rating.epsilon_policy
    );
}

fn run(args: &Args, config: AppConfig) -> Result<()> {
    let time_limit_seconds = match (args.time_limit_seconds, args.time_limit_minutes) {
        (Some(seconds), _) => seconds,
        (None, Some(minutes)) => minutes * 60.0,
        (None, None) => config.rating.default_time_limit_seconds(),
    };

    let engine = RatingEngine::new(config.rating)?;
    let initial = engine.default_state();

    let mut player = RatingState::new(
        args.player_rating.unwrap_or(initial.rating),
        args.player_uncertainty.unwrap_or(initial.uncertainty),
    );
    let mut puzzle = RatingState::new(
        args.puzzle_rating.unwrap_or(initial.rating),
        args.puzzle_uncertainty.unwrap_or(initial.uncertainty),
    );

    let attempt = Attempt::new(args.response_seconds, time_limit_seconds, !args.incorrect);
    let inactivity = Inactivity::new(args.player_days, args.puzzle_days);

    for round in 0..args.repeat {
        // Inactivity only precedes the first attempt of the run
        let gap = if round == 0 {
            inactivity
        } else {
            Inactivity::default()
        };
        let outcome = engine.calculate_elo(&mut player, &mut puzzle, &attempt, gap)?;
        println!("{}", serde_json::to_string(&outcome)?);
    }

    info!(
        player_rating = player.rating,
        puzzle_rating = puzzle.rating,
        "Finished {} attempt(s)",
        args.repeat
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if args.dry_run {
        info!("Configuration validation successful, exiting");
        return Ok(());
    }

    if let Err(e) = run(&args, config) {
        error!("Rating failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
