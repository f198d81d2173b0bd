//! CLI error types

use careplan_core::types::DateError;
use careplan_schedules::schedules::{CodecError, ScheduleError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `careplan` binary
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Unsupported flag value or file type
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading an input file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded or validated
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A date argument failed to parse
    #[error("Invalid date argument: {0}")]
    Date(#[from] DateError),

    /// The schedule could not be bound to a rule
    #[error("Invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),

    /// A JSON schedule file could not be decoded
    #[error("Invalid schedule file: {0}")]
    Codec(#[from] CodecError),

    /// A TOML schedule file could not be parsed
    #[error("Invalid schedule file: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON output could not be rendered
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
