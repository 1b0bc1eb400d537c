//! CLI argument parsing using clap derive macros.
//!
//! Running `rastodo` with no subcommand lists the todo file; the listing
//! flags live at the top level so `rastodo --all --sort-cat` works as-is.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// rastodo - text based todo list
#[derive(Parser, Debug)]
#[command(name = "rastodo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Monochrome output
    #[arg(long, visible_alias = "no-color", global = true)]
    pub mono: bool,

    /// Todo file to use (default: ~/.todo)
    #[arg(short, long, global = true, env = "RASTODO_FILE")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub list: ListArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Filtering and display options for the listing.
#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Show all items, regardless of date and filtering
    #[arg(long)]
    pub all: bool,

    /// Reverse the order of sorting (most distant first)
    #[arg(short, long)]
    pub reverse: bool,

    /// Group by category
    #[arg(long)]
    pub sort_cat: bool,

    /// Show line numbers from the todo file in output
    #[arg(long)]
    pub line_numbers: bool,

    /// Put each description on its own line
    #[arg(long)]
    pub two_lines: bool,

    /// Days after which items are not shown (default: 22)
    #[arg(short, long, allow_negative_numbers = true)]
    pub days: Option<i64>,

    /// Only include these types (string of letters, e.g. "tsa")
    #[arg(long)]
    pub only_types: Option<String>,

    /// Show appointments only (same as --only-types=a)
    #[arg(long, conflicts_with = "only_types")]
    pub appointments: bool,

    /// Exclude these types (string of letters)
    #[arg(long)]
    pub ex_types: Option<String>,

    /// Only include these categories (comma delimited)
    #[arg(long)]
    pub only_cat: Option<String>,

    /// Exclude these categories (comma delimited)
    #[arg(long)]
    pub ex_cat: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the todo file in $EDITOR
    #[command(alias = "e")]
    Edit,

    /// Move a recurring item to its next due date
    #[command(alias = "b")]
    Bump {
        /// Line number of the recurring item (see --line-numbers)
        line: usize,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Open config in $EDITOR
    Edit,

    /// Print config file path
    Path,
}
