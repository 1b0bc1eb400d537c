//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/rastodo/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::edit::{resolve_editor, run_editor};
use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# rastodo - text based todo list
#
# Every setting is optional. Command line flags and environment variables
# take precedence over the values here.

# Config schema version (do not modify)
version = 1

# Todo file to read (can also use RASTODO_FILE env var or -f)
# file = "~/.todo"

# Days after which dated items are not shown
# days = 22

# Editor for `rastodo edit`, used when neither $EDITOR nor $VISUAL is set
# editor = "vim"

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)
# two_lines = false         # Put each description on its own line
# line_numbers = false      # Prefix items with their line in the todo file
# sort_category = false     # Group items by category
# reverse = false           # Most distant items first
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Todo file path; a leading `~/` is expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Cutoff in days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,

    /// Editor command for `edit` and `config edit`, below `EDITOR`/`VISUAL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            file: None,
            days: None,
            editor: None,
            output: OutputConfig::default(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub two_lines: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_numbers: Option<bool>,

    /// Group the listing by category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_category: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}

/// Gets the config file path.
///
/// Uses `RASTODO_CONFIG` if set, then `$XDG_CONFIG_HOME/rastodo/config.toml`,
/// then `~/.config/rastodo/config.toml` on all platforms.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("RASTODO_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("rastodo").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("rastodo").join("config.toml"))
        .ok_or_else(|| {
            CommandError::Config("Could not determine config directory".to_string())
        })
}

/// Loads the configuration from disk.
///
/// A missing file yields the defaults.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    parse_config(&content)
}

fn parse_config(content: &str) -> Result<Config> {
    let mut config: Config = toml::from_str(content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    // Only version 1 exists so far.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            if let Some(ref file) = config.file {
                println!("  file: {}", file);
            }
            if let Some(days) = config.days {
                println!("  days: {}", days);
            }
            if let Some(ref editor) = config.editor {
                println!("  editor: {}", editor);
            }

            println!("\n[output]");
            let output = &config.output;
            for (key, value) in [
                ("color", output.color),
                ("two_lines", output.two_lines),
                ("line_numbers", output.line_numbers),
                ("sort_category", output.sort_category),
                ("reverse", output.reverse),
            ] {
                if let Some(value) = value {
                    println!("  {}: {}", key, value);
                }
            }
        } else {
            println!("(No config file exists. Run 'rastodo config edit' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config edit command.
///
/// Creates a commented default file first if none exists.
pub fn execute_edit(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Config(format!("Failed to create config directory: {}", e)))?;
    }

    if !path.exists() {
        fs::write(&path, DEFAULT_CONFIG)
            .map_err(|e| CommandError::Config(format!("Failed to create config file: {}", e)))?;

        if !ctx.quiet && !ctx.json_output {
            eprintln!("Created default config at: {}", path.display());
        }
    }

    // A broken file must still be editable, so fall back to the defaults.
    let config = load_config().unwrap_or_default();
    let editor = resolve_editor(&config);
    let status = run_editor(ctx, &editor, &path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": if status.success() { "success" } else { "error" },
            "editor": editor,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if status.success() {
            println!("Config saved.");
        } else {
            eprintln!("Editor exited with error");
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}
