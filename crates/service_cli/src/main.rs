//! Careplan CLI - Command Line Queries for Care Schedules
//!
//! This is the operational entry point for the careplan schedule engine.
//!
//! # Commands
//!
//! - `careplan count --schedule <file> [--date <d>]` - Events on one date
//! - `careplan calendar --schedule <file> --from <d> --to <d>` - Events per date over a range
//! - `careplan next --schedule <file> [--after <d>]` - Next date with events
//! - `careplan check --schedule <file>` - Validate and summarise a schedule file
//!
//! # Architecture
//!
//! As part of the Service layer, this crate loads schedule files through
//! the careplan_schedules codec and renders query results as tables or JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use crate::config::{build_config, CliOverrides};

/// Careplan schedule engine CLI
#[derive(Parser)]
#[command(name = "careplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to careplan.toml if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the events on one date
    Count {
        /// Path to schedule file (JSON/TOML)
        #[arg(short, long)]
        schedule: PathBuf,

        /// Query date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List per-date event counts over a range
    Calendar {
        /// Path to schedule file (JSON/TOML)
        #[arg(short, long)]
        schedule: PathBuf,

        /// First date of the range (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Last date of the range (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },

    /// Find the next date with events
    Next {
        /// Path to schedule file (JSON/TOML)
        #[arg(short, long)]
        schedule: PathBuf,

        /// Search strictly after this date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        after: Option<String>,
    },

    /// Validate a schedule file and print its definition
    Check {
        /// Path to schedule file (JSON/TOML)
        #[arg(short, long)]
        schedule: PathBuf,
    },
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        config_file: cli.config.clone(),
        output_format: cli.format.clone(),
        verbose: cli.verbose,
    };
    let config = build_config(&overrides)?;

    init_tracing(config.log_level.as_filter_str());
    info!(
        log_level = %config.log_level,
        output_format = %config.output_format,
        "Configuration loaded"
    );

    let format = config.output_format;
    match cli.command {
        Commands::Count { schedule, date } => {
            commands::count::run(&schedule, date.as_deref(), format)
        }
        Commands::Calendar { schedule, from, to } => {
            commands::calendar::run(&schedule, &from, &to, format)
        }
        Commands::Next { schedule, after } => {
            commands::next::run(&schedule, after.as_deref(), format)
        }
        Commands::Check { schedule } => commands::check::run(&schedule, format),
    }
}
