//! Locating and reading the todo file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

use super::config::Config;
use super::{CommandError, Result};

/// Default todo file name, relative to the home directory.
const DEFAULT_TODO_FILE: &str = ".todo";

/// The todo file cannot be used.
#[derive(Debug, Error)]
pub enum TodoFileError {
    #[error("{} does not exist; use the -f option to specify a todo file", path.display())]
    NotFound { path: PathBuf },

    #[error("{} is not readable.", path.display())]
    NotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolves the todo file: `-f`/`RASTODO_FILE`, then the config file, then
/// `~/.todo`.
pub fn resolve_path(flag: Option<&Path>, config: &Config) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }

    let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());

    if let Some(file) = config.file.as_deref() {
        return Ok(expand_tilde(file, home.as_deref()));
    }

    home.map(|home| home.join(DEFAULT_TODO_FILE))
        .ok_or_else(|| CommandError::Config("Could not determine home directory".to_string()))
}

/// Expands a leading `~` or `~/` against `home`.
fn expand_tilde(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

/// Reads the whole todo file.
pub fn read(path: &Path) -> std::result::Result<String, TodoFileError> {
    if !path.exists() {
        return Err(TodoFileError::NotFound {
            path: path.to_path_buf(),
        });
    }

    fs::read_to_string(path).map_err(|source| TodoFileError::NotReadable {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flag_wins_over_config() {
        let config = Config {
            file: Some("/from/config".to_string()),
            ..Config::default()
        };
        let path = resolve_path(Some(Path::new("/from/flag")), &config).unwrap();
        assert_eq!(path, PathBuf::from("/from/flag"));
    }

    #[test]
    fn test_config_file_used_without_flag() {
        let config = Config {
            file: Some("/srv/todo.txt".to_string()),
            ..Config::default()
        };
        let path = resolve_path(None, &config).unwrap();
        assert_eq!(path, PathBuf::from("/srv/todo.txt"));
    }

    #[test]
    fn test_expand_tilde() {
        let home = Path::new("/home/alex");
        assert_eq!(
            expand_tilde("~/notes/todo", Some(home)),
            PathBuf::from("/home/alex/notes/todo")
        );
        assert_eq!(expand_tilde("~", Some(home)), PathBuf::from("/home/alex"));
        assert_eq!(
            expand_tilde("~other/todo", Some(home)),
            PathBuf::from("~other/todo")
        );
        assert_eq!(expand_tilde("~/todo", None), PathBuf::from("~/todo"));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing");
        let err = read(&path).unwrap_err();
        assert!(matches!(err, TodoFileError::NotFound { .. }));
        assert_eq!(
            err.to_string(),
            format!(
                "{} does not exist; use the -f option to specify a todo file",
                path.display()
            )
        );
    }

    #[test]
    fn test_read_directory_is_not_readable() {
        let dir = TempDir::new().unwrap();
        let err = read(dir.path()).unwrap_err();
        assert!(matches!(err, TodoFileError::NotReadable { .. }));
        assert_eq!(
            err.to_string(),
            format!("{} is not readable.", dir.path().display())
        );
    }

    #[test]
    fn test_read_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo");
        fs::write(&path, "w something\n").unwrap();
        assert_eq!(read(&path).unwrap(), "w something\n");
    }
}
