//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dupcheck - Validate a duplicate-issue detector against known duplicates.
#[derive(Debug, Parser)]
#[command(name = "dupcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Report format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DUPCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log parsing and validation details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Report format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Plain text report (default)
    Text,
    /// JSON document
    Json,
    /// Table of pairs followed by the summary
    Table,
}

/// Resolution mode options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Only a direct detector hit counts
    Direct,
    /// A chain of detector hits counts
    Transitive,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate detector output against known duplicates
    Validate(ValidateArgs),

    /// Format matching-service results into detector output lines
    Format(FormatArgs),

    /// List the unique issue keys named by the ground truth
    Keys(KeysArgs),

    /// Show the effective configuration
    Config,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// File with known duplicate links
    #[arg(short, long)]
    pub actual: PathBuf,

    /// Detector output (formatted text, or service results ending in .json)
    #[arg(short, long)]
    pub detected: PathBuf,

    /// File with confirmed non-duplicate pairs
    #[arg(short, long)]
    pub non_duplicates: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// How known duplicates are resolved
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// How known non-duplicates are resolved
    #[arg(long, value_enum)]
    pub non_duplicate_mode: Option<ModeArg>,
}

/// Arguments for the format command.
#[derive(Debug, Parser)]
pub struct FormatArgs {
    /// Matching-service results (JSON)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write formatted lines here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the keys command.
#[derive(Debug, Parser)]
pub struct KeysArgs {
    /// File with known duplicate links
    #[arg(short, long)]
    pub duplicates: Option<PathBuf>,

    /// File with confirmed non-duplicate pairs
    #[arg(short, long)]
    pub non_duplicates: Option<PathBuf>,

    /// Write keys here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Table => crate::config::OutputFormat::Table,
        }
    }
}

impl From<ModeArg> for dupcheck_domain::ResolutionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Direct => dupcheck_domain::ResolutionMode::Direct,
            ModeArg::Transitive => dupcheck_domain::ResolutionMode::Transitive,
        }
    }
}
