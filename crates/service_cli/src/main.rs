//! Sigma CLI - Standard Deviation Intuition Lessons
//!
//! Command-line front end for the four lessons of the numeric core.
//!
//! # Commands
//!
//! - `sigma modules` - List the lessons
//! - `sigma additivity --sd1 15 --sd2 20` - Combine independent SDs
//! - `sigma averaging --start 10 --end 50` - Blend two regimes
//! - `sigma distance --low 10 --high 40 --shock 5` - Compare shock impact
//! - `sigma time --daily-sd 1.0` - Scale a daily SD across horizons
//! - `sigma all` - Run every lesson at its initial values
//! - `sigma run --input lesson.json` - Evaluate a JSON-encoded lesson
//!
//! Results go to stdout; logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod render;

pub use error::{CliError, Result};

use config::{build_config, CliArgs, OutputFormat};

/// Standard deviation intuition lessons
#[derive(Parser)]
#[command(name = "sigma")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./sigma.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Clamp out-of-range inputs to the nearest bound instead of rejecting them
    #[arg(long, global = true)]
    clamp: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the lessons
    Modules,

    /// Combine two independent SDs
    Additivity {
        /// First SD
        #[arg(long)]
        sd1: Option<f64>,

        /// Second SD
        #[arg(long)]
        sd2: Option<f64>,
    },

    /// Sweep the blend between two regime SDs
    Averaging {
        /// SD at weight 0
        #[arg(long)]
        start: Option<f64>,

        /// SD at weight 1
        #[arg(long)]
        end: Option<f64>,

        /// Weight spacing in percent (must divide 100)
        #[arg(long)]
        step: Option<u32>,
    },

    /// Apply the same SD shock at a low and a high baseline
    Distance {
        /// Low regime baseline SD
        #[arg(long)]
        low: Option<f64>,

        /// High regime baseline SD
        #[arg(long)]
        high: Option<f64>,

        /// SD shock applied to both baselines
        #[arg(long)]
        shock: Option<f64>,

        /// Curve extends this far past the larger shocked SD
        #[arg(long)]
        margin: Option<f64>,

        /// Variance curve sample spacing
        #[arg(long)]
        curve_step: Option<f64>,
    },

    /// Scale a daily SD across horizons
    Time {
        /// One-day SD
        #[arg(long)]
        daily_sd: Option<f64>,

        /// Horizons in days, strictly ascending (e.g. 1,5,21)
        #[arg(long, value_delimiter = ',')]
        horizons: Vec<u32>,
    },

    /// Run every lesson at its initial values
    All,

    /// Evaluate a lesson described by a JSON file
    Run {
        /// Path to the lesson input file
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// Initialise tracing on stderr; `RUST_LOG` overrides the configured level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config_file: cli.config.clone(),
        verbose: cli.verbose,
        format: cli.format,
        clamp: cli.clamp,
    };
    let config = build_config(&args)?;

    init_tracing(config.log_level.as_filter_str());
    debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Modules => commands::modules::run(&config),
        Commands::Additivity { sd1, sd2 } => {
            commands::lesson::run(commands::lesson::additivity_input(sd1, sd2), &config)
        }
        Commands::Averaging { start, end, step } => commands::lesson::run(
            commands::lesson::averaging_input(start, end, step, &config),
            &config,
        ),
        Commands::Distance {
            low,
            high,
            shock,
            margin,
            curve_step,
        } => commands::lesson::run(
            commands::lesson::distance_input(low, high, shock, margin, curve_step, &config),
            &config,
        ),
        Commands::Time { daily_sd, horizons } => commands::lesson::run(
            commands::lesson::time_input(daily_sd, horizons, &config),
            &config,
        ),
        Commands::All => commands::all::run(&config),
        Commands::Run { input } => commands::input::run(&input, &config),
    }
}
