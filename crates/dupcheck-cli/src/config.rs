//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use dupcheck_domain::{ResolutionMode, ValidationPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default report format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// How known duplicates are resolved
    #[serde(default)]
    pub mode: ModeSetting,

    /// How known non-duplicates are resolved
    #[serde(default)]
    pub non_duplicate_mode: ModeSetting,
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text report
    Text,
    /// JSON document
    Json,
    /// Table of pairs plus summary
    Table,
}

/// Resolution mode as written in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    /// Direct hits only
    #[default]
    Direct,
    /// Chains of hits
    Transitive,
}

impl From<ModeSetting> for ResolutionMode {
    fn from(mode: ModeSetting) -> Self {
        match mode {
            ModeSetting::Direct => ResolutionMode::Direct,
            ModeSetting::Transitive => ResolutionMode::Transitive,
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".dupcheck").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default path.
    ///
    /// A missing file yields the default configuration; an unreadable or
    /// malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::path()?,
        };

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Resolution policy from the settings.
    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            duplicate_mode: self.settings.mode.into(),
            non_duplicate_mode: self.settings.non_duplicate_mode.into(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Text,
            mode: ModeSetting::Direct,
            non_duplicate_mode: ModeSetting::Direct,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}
