//! Config command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// `source` is the file given with `--config`, if any.
pub fn execute_config(config: &Config, source: Option<&Path>, formatter: &Formatter) -> Result<()> {
    let path = match source {
        Some(path) => path.to_path_buf(),
        None => Config::path()?,
    };

    let msg = if path.exists() {
        format!("Config file: {}", path.display())
    } else {
        format!("No config file at {}, using defaults", path.display())
    };
    eprintln!("{}", formatter.info(&msg));

    print!("{}", config.to_toml()?);
    Ok(())
}
