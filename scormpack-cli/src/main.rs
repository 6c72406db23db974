//! scormpack CLI - Command-line interface
//!
//! Indexes course directories, writes SCORM manifests and assembles
//! composite courses. Command output goes to stdout, logs to stderr.

mod commands;
mod error;

use std::path::PathBuf;

use clap::Parser;
use scormpack::config::{config_file_path, ConfigFile};
use scormpack::logging::{init_logging, LogLevel};

use commands::Commands;
use error::CliError;

#[derive(Parser)]
#[command(name = "scormpack")]
#[command(version, about = "Index, manifest and merge SCORM course bundles", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.scormpack/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.unwrap_or_else(config_file_path);
    let config = ConfigFile::load_from(&config_path).map_err(|error| CliError::Config {
        path: config_path.clone(),
        error,
    })?;

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config.logging.level
    };
    let _logging_guard = init_logging(level, config.logging.file.as_deref())
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    tracing::debug!(config = %config_path.display(), "Loaded configuration");

    commands::run(cli.command, &config, &config_path)
}
