//! bsgreeks - Black-Scholes prices and Greeks from the command line
//!
//! # Commands
//!
//! - `bsgreeks price --side call --spot 100 --strike 100 -t 1 -v 0.2 -r 0.05 -q 0 -m discrete` - Price one option
//! - `bsgreeks batch <file>` - Price every request in a JSON or CSV file
//! - `bsgreeks converge ... --ladder 10,100,1000` - Discrete convergence study
//!
//! # Configuration
//!
//! Settings are layered: TOML file (`--config`), then `PRICER_*`
//! environment variables, then command-line flags.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate only parses input, builds a
//! [`PricingEngine`] and renders its output.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pricer_pricing::PricingEngine;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::OptionArgs;
use config::{build_config, CliArgs, ConfigError, LogLevel};
use output::OutputFormat;

/// Black-Scholes pricing and Greeks
#[derive(Parser)]
#[command(name = "bsgreeks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "PRICER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "PRICER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Discrete step count (integer or "daily")
    #[arg(long, global = true, env = "PRICER_STEPS")]
    steps: Option<String>,

    /// Discretisation strategy (accumulation, binomial)
    #[arg(long, global = true, env = "PRICER_STRATEGY")]
    strategy: Option<String>,

    /// Upper bound on the discrete step count
    #[arg(long, global = true, env = "PRICER_MAX_STEPS")]
    max_steps: Option<usize>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true, env = "PRICER_FORMAT")]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a single option
    Price(OptionArgs),

    /// Price a batch of requests from a JSON array or CSV file
    Batch {
        /// Path to the request file (.json or .csv)
        input: PathBuf,
    },

    /// Compare discrete prices over a step ladder with the closed form
    Converge {
        #[command(flatten)]
        option: OptionArgs,

        /// Step counts to evaluate
        #[arg(long, value_delimiter = ',', default_value = "10,50,100,500,1000")]
        ladder: Vec<usize>,
    },
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        Self {
            config_file: cli.config.clone(),
            log_level: cli.log_level.clone(),
            steps: cli.steps.clone(),
            strategy: cli.strategy.clone(),
            max_steps: cli.max_steps,
            format: cli.format,
        }
    }
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr so table,
/// JSON and CSV output on stdout stay clean.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs::from(&cli))?;

    init_tracing(config.log_level);
    debug!(?config, "Configuration resolved");

    let engine = PricingEngine::new(config.engine_config()?).map_err(ConfigError::from)?;
    info!(
        steps = %config.steps,
        strategy = %config.strategy,
        "Engine ready"
    );

    match cli.command {
        Commands::Price(option) => commands::price::run(&engine, &option, config.format),
        Commands::Batch { input } => commands::batch::run(&engine, &input, config.format),
        Commands::Converge { option, ladder } => {
            commands::converge::run(&engine, &option, &ladder, config.format)
        }
    }
}
