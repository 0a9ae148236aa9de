//! Command implementations.

pub mod config;
pub mod format;
pub mod keys;
pub mod validate;

pub use self::config::execute_config;
pub use self::format::execute_format;
pub use self::keys::execute_keys;
pub use self::validate::{execute_validate, run_validation};

use crate::error::{CliError, Result};
use std::fs;
use std::path::Path;

/// Read an input file, reporting a missing file by name.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CliError::MissingFile(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Write `contents` to `path`, or print it to stdout.
pub(crate) fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, contents)?;
            tracing::info!(path = %path.display(), bytes = contents.len(), "Output written");
        }
        None => {
            print!("{}", contents);
            if !contents.is_empty() && !contents.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        match read_input(&path) {
            Err(CliError::MissingFile(p)) => assert_eq!(p, path),
            other => panic!("Expected MissingFile, got {:?}", other),
        }
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        write_output(Some(path.as_path()), "hello\n").unwrap();
        assert_eq!(read_input(&path).unwrap(), "hello\n");
    }
}
