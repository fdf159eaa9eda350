//! Heavy Hitters - Main entrypoint.
//!
//! Loads configuration, initializes logging, and runs a measurement that
//! scores both estimators against their recency windows on one synthetic
//! workload.

use anyhow::Context;
use clap::{Parser, Subcommand};
use heavy_hitters_lib::config::{ConfigLoader, HeavyHittersConfig, LogConfig, ENV_PREFIX};
use heavy_hitters_lib::data_structures::TracingObserver;
use heavy_hitters_lib::error::HeavyHittersError;
use heavy_hitters_lib::harness::run_comparison;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the heavy-hitter measurement tool.
#[derive(Parser, Debug)]
#[clap(name = "Heavy Hitters", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run one measurement and print the report
    Run {
        /// Print the report as JSON
        #[clap(long)]
        json: bool,

        /// Seed the workload generator for a reproducible run
        #[clap(long, value_parser)]
        seed: Option<u64>,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so that reports on stdout stay machine-readable.
fn init_logging(log: &LogConfig) -> Result<(), HeavyHittersError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let installed = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };
    installed.map_err(|e| {
        HeavyHittersError::Custom(format!("Failed to set global tracing subscriber: {e}"))
    })
}

fn load_config(args: &Args) -> anyhow::Result<HeavyHittersConfig> {
    ConfigLoader::new(args.config.as_deref(), ENV_PREFIX)
        .load()
        .with_context(|| match &args.config {
            Some(path) => format!("Invalid configuration in {}", path.display()),
            None => "Invalid configuration".to_string(),
        })
}

/// Main entry point for the application.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match &args.command {
        None => run(&args, false, None),
        Some(Command::Run { json, seed }) => run(&args, *json, *seed),
        Some(Command::Validate) => {
            let config = load_config(&args)?;
            init_logging(&config.log)?;
            info!("Configuration validated successfully");
            Ok(())
        }
        Some(Command::GenConfig { output }) => {
            init_logging(&LogConfig::default())?;
            let default_config = HeavyHittersConfig::default();

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent).map_err(HeavyHittersError::Io)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| HeavyHittersError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(output, toml)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

fn run(args: &Args, json: bool, seed: Option<u64>) -> anyhow::Result<()> {
    let mut config = load_config(args)?;
    init_logging(&config.log)?;
    if seed.is_some() {
        config.workload.seed = seed;
    }

    info!(
        num_keys = config.workload.num_keys,
        repeat_percent = config.workload.repeat_percent,
        seed = ?config.workload.seed,
        "Starting measurement"
    );
    let comparison = run_comparison(&config, Some(Arc::new(TracingObserver)))
        .context("Measurement failed")?;

    if json {
        let report = serde_json::to_string_pretty(&comparison).map_err(HeavyHittersError::from)?;
        println!("{report}");
    } else {
        println!("{comparison}");
    }
    Ok(())
}
