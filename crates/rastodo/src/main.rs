use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::bump::BumpOptions;
use commands::config::load_config;
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{:#}", error_json);
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Installs the log subscriber on stderr.
///
/// `RUST_LOG` wins when it is set and valid; otherwise `--verbose` means
/// `debug` and logging is off.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "off" };
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> commands::Result<()> {
    // Config commands must work even when the config file is broken.
    let config = match &cli.command {
        Some(Commands::Config { .. }) | Some(Commands::Completions { .. }) => {
            load_config().unwrap_or_default()
        }
        _ => load_config()?,
    };
    let ctx = CommandContext::from_cli(cli, &config);

    match &cli.command {
        None => {
            let path = commands::todo_file::resolve_path(cli.file.as_deref(), &config)?;
            commands::list::execute(&ctx, &cli.list, &config, &path)
        }
        Some(Commands::Edit) => {
            let path = commands::todo_file::resolve_path(cli.file.as_deref(), &config)?;
            commands::edit::execute(&ctx, &config, &path)
        }
        Some(Commands::Bump { line, yes }) => {
            let path = commands::todo_file::resolve_path(cli.file.as_deref(), &config)?;
            let opts = BumpOptions {
                line: *line,
                yes: *yes,
            };
            commands::bump::execute(&ctx, &opts, &path)
        }
        Some(Commands::Config { command }) => match command {
            None | Some(ConfigCommands::Show) => commands::config::execute_show(&ctx),
            Some(ConfigCommands::Edit) => commands::config::execute_edit(&ctx),
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx),
        },
        Some(Commands::Completions { shell }) => Ok(commands::completions::execute(shell)?),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Policy(_) => "OPTION_ERROR",
        CommandError::TodoFile(_) => "TODO_FILE_ERROR",
        CommandError::Bump(_) => "BUMP_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Usage(_) => "USAGE_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Json(_) => 1,
        CommandError::Config(_) | CommandError::Policy(_) | CommandError::Usage(_) => 2,
        CommandError::TodoFile(_) | CommandError::Io(_) => 3,
        CommandError::Bump(_) => 4,
    }
}
