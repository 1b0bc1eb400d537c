//! Edit command implementation.
//!
//! Opens the todo file in the user's editor.

use std::env;
use std::path::Path;
use std::process::{Command, ExitStatus};

use tracing::debug;

use super::config::Config;
use super::{CommandContext, CommandError, Result};

/// Picks the editor: `EDITOR`, then `VISUAL`, then the config, then `vi`.
pub fn resolve_editor(config: &Config) -> String {
    let non_blank = |e: &String| !e.trim().is_empty();
    env::var("EDITOR")
        .ok()
        .filter(non_blank)
        .or_else(|| env::var("VISUAL").ok().filter(non_blank))
        .or_else(|| config.editor.clone().filter(non_blank))
        .unwrap_or_else(|| "vi".to_string())
}

/// Runs `editor` on `path` and waits for it to exit.
///
/// The editor string may carry arguments (`"code --wait"`).
pub fn run_editor(ctx: &CommandContext, editor: &str, path: &Path) -> Result<ExitStatus> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");

    if ctx.verbose {
        eprintln!("Opening {} with {}", path.display(), editor);
    }
    debug!(editor, path = %path.display(), "launching editor");

    Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| CommandError::Config(format!("Failed to open editor '{}': {}", editor, e)))
}

/// Executes the edit command.
///
/// The todo file does not have to exist yet; the editor creates it.
pub fn execute(ctx: &CommandContext, config: &Config, path: &Path) -> Result<()> {
    let editor = resolve_editor(config);
    let status = run_editor(ctx, &editor, path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": if status.success() { "success" } else { "error" },
            "editor": editor,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !status.success() && !ctx.quiet {
        eprintln!("Editor exited with error");
    }

    Ok(())
}
