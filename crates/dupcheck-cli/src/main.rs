//! Dupcheck CLI - Validate a duplicate-issue detector against known duplicates.

use clap::Parser;
use dupcheck_cli::commands;
use dupcheck_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> dupcheck_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (log to stderr, RUST_LOG wins over --verbose)
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config; a missing file means defaults
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        Command::Validate(args) => commands::execute_validate(args, &config, &formatter),
        Command::Format(args) => commands::execute_format(args, &formatter),
        Command::Keys(args) => commands::execute_keys(args, &formatter),
        Command::Config => commands::execute_config(&config, cli.config.as_deref(), &formatter),
    }
}
