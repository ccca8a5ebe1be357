//! Simfolio CLI - Command Line Operations for Portfolio Risk Analytics
//!
//! This is the operational entry point for the simfolio risk library.
//!
//! # Commands
//!
//! - `simfolio simulate --config <file>` - Run a Monte Carlo simulation
//! - `simfolio decompose --portfolio <file>` - Decompose portfolio risk
//! - `simfolio check [--config <file>]` - Validate a configuration file
//!
//! # Architecture
//!
//! As the service layer, this crate loads plain-data configuration,
//! invokes the kernel crates (`sim_engine`, `sim_risk`) and renders
//! their outputs as CSV/Markdown artifacts. No file I/O happens below
//! this layer.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod report;

pub use error::{CliError, Result};

/// Simfolio Portfolio Risk CLI
#[derive(Parser)]
#[command(name = "simfolio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Monte Carlo portfolio simulation
    Simulate {
        /// Path to TOML configuration file with a [simulation] section
        #[arg(short, long)]
        config: String,

        /// Output directory for report artifacts
        #[arg(short, long, default_value = "./reports")]
        output_dir: String,

        /// Output format (files, json)
        #[arg(short, long, default_value = "files")]
        format: String,
    },

    /// Decompose portfolio risk into factor contributions
    Decompose {
        /// Path to TOML portfolio file with [[factor]] and [[asset]] tables
        #[arg(short, long)]
        portfolio: String,

        /// Output directory for report artifacts
        #[arg(short, long, default_value = "./reports")]
        output_dir: String,

        /// Output format (files, json)
        #[arg(short, long, default_value = "files")]
        format: String,
    },

    /// Validate a configuration file and report stack status
    Check {
        /// Optional configuration file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Simulate {
            config,
            output_dir,
            format,
        } => commands::simulate::run(&config, &output_dir, &format),
        Commands::Decompose {
            portfolio,
            output_dir,
            format,
        } => commands::decompose::run(&portfolio, &output_dir, &format),
        Commands::Check { config } => commands::check::run(config.as_deref()),
    }
}
