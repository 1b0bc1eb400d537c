//! Bump command implementation.
//!
//! Moves a recurring item to its next due date and rewrites the todo file.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use dialoguer::Confirm;
use rastodo_core::{bump, BumpOutcome, ParseContext};
use tempfile::NamedTempFile;
use tracing::debug;

use super::{todo_file, CommandContext, CommandError, Result};
use crate::output::{format_bump_json, format_bump_preview};

/// Options for the bump command.
#[derive(Debug)]
pub struct BumpOptions {
    /// 1-based line of the recurring item.
    pub line: usize,
    /// Skip confirmation.
    pub yes: bool,
}

/// Executes the bump command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, the line is not a
/// recurring item, or confirmation is needed but stdin is not a terminal.
pub fn execute(ctx: &CommandContext, opts: &BumpOptions, path: &Path) -> Result<()> {
    let text = todo_file::read(path)?;
    let outcome = bump(&text, opts.line, &ParseContext::local())?;

    if !opts.yes {
        if !io::stdin().is_terminal() {
            return Err(CommandError::Usage(
                "refusing to bump without confirmation; pass --yes when not running interactively"
                    .to_string(),
            ));
        }

        eprintln!("{}", format_bump_preview(&outcome, ctx.use_colors));
        let confirmed = Confirm::new()
            .with_prompt("Bump this item?")
            .default(true)
            .interact()
            .map_err(|e| CommandError::Io(io::Error::other(e.to_string())))?;

        if !confirmed {
            if ctx.json_output {
                println!("{}", format_bump_json(&outcome, path, false)?);
            } else if !ctx.quiet {
                eprintln!("Aborted.");
            }
            return Ok(());
        }
    }

    write_atomically(path, &outcome)?;
    debug!(line = outcome.line, new_date = %outcome.new_date, "bumped recurring item");

    if ctx.json_output {
        println!("{}", format_bump_json(&outcome, path, true)?);
    } else if !ctx.quiet {
        println!("{}", format_bump_preview(&outcome, ctx.use_colors));
    }

    Ok(())
}

/// Replaces the file through a temporary file in the same directory.
///
/// Symlinks are resolved first so the link survives and its target is
/// the file that gets rewritten.
fn write_atomically(path: &Path, outcome: &BumpOutcome) -> Result<()> {
    let target = fs::canonicalize(path)?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(outcome.contents.as_bytes())?;
    file.as_file().sync_all()?;
    fs::set_permissions(file.path(), fs::metadata(&target)?.permissions())?;
    file.persist(&target).map_err(|e| CommandError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn ctx() -> CommandContext {
        CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
            verbose: false,
        }
    }

    #[test]
    fn test_write_atomically_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo");
        let original = "[chores]\nr3 2014-06-10 =2w water the plants\n";
        fs::write(&path, original).unwrap();

        let today = ParseContext::new(NaiveDate::from_ymd_opt(2014, 6, 1).unwrap());
        let outcome = bump(original, 2, &today).unwrap();
        write_atomically(&path, &outcome).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[chores]\nr3 2014-06-24 =2w water the plants\n"
        );
        // No temporary file is left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomically_follows_symlink() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real_todo");
        let link = dir.path().join("todo");
        let original = "r3 2014-06-10 =2w water the plants\n";
        fs::write(&real, original).unwrap();
        symlink(&real, &link).unwrap();

        let today = ParseContext::new(NaiveDate::from_ymd_opt(2014, 6, 1).unwrap());
        let outcome = bump(original, 1, &today).unwrap();
        write_atomically(&link, &outcome).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(
            fs::read_to_string(&real).unwrap(),
            "r3 2014-06-24 =2w water the plants\n"
        );
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_bump_without_yes_needs_terminal() {
        if io::stdin().is_terminal() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo");
        fs::write(&path, "r1 2000-01-01 =1d daily\n").unwrap();

        let opts = BumpOptions { line: 1, yes: false };
        let result = execute(&ctx(), &opts, &path);

        assert!(matches!(result, Err(CommandError::Usage(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "r1 2000-01-01 =1d daily\n");
    }

    #[test]
    fn test_bump_with_yes_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo");
        fs::write(&path, "w wish\nr1 2000-01-01 =1d daily\n").unwrap();

        let opts = BumpOptions { line: 2, yes: true };
        execute(&ctx(), &opts, &path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "w wish\nr1 2000-01-02 =1d daily\n"
        );
    }

    #[test]
    fn test_bump_non_recurring_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo");
        fs::write(&path, "w wish\n").unwrap();

        let opts = BumpOptions { line: 1, yes: true };
        let result = execute(&ctx(), &opts, &path);

        assert!(matches!(result, Err(CommandError::Bump(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "w wish\n");
    }

    #[test]
    fn test_bump_missing_file() {
        let dir = TempDir::new().unwrap();
        let opts = BumpOptions { line: 1, yes: true };
        let result = execute(&ctx(), &opts, &dir.path().join("absent"));
        assert!(matches!(result, Err(CommandError::TodoFile(_))));
    }
}
