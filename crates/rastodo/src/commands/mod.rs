//! Command implementations for the rastodo CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod bump;
pub mod completions;
pub mod config;
pub mod edit;
pub mod list;
pub mod todo_file;

use std::env;

use crate::cli::Cli;
use config::Config;

pub use todo_file::TodoFileError;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Invalid filtering options.
    #[error("{0}")]
    Policy(#[from] rastodo_core::PolicyError),

    /// The todo file is missing or unreadable.
    #[error("{0}")]
    TodoFile(#[from] TodoFileError),

    /// The requested line cannot be bumped.
    #[error("cannot bump: {0}")]
    Bump(#[from] rastodo_core::BumpError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The command cannot run as invoked.
    #[error("{0}")]
    Usage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// Colors are off under `--mono`, when `NO_COLOR` is set to anything
    /// non-empty, or when the config says `color = false`.
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        let no_color_env = env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json,
            use_colors: !cli.mono && !no_color_env && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}
