//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use scormpack::composite::CompositeError;
use scormpack::config::ConfigFileError;
use scormpack::course::IndexError;
use scormpack::manifest::ManifestError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be read or written
    Config { path: PathBuf, error: ConfigFileError },
    /// Course directory or index failure
    Index(IndexError),
    /// Manifest generation failure
    Manifest(ManifestError),
    /// Composite assembly failure
    Composite(CompositeError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Manifest(ManifestError::EntryNotFound { .. }) => {
                eprintln!();
                eprintln!("Pass --entry to name the course's launch document.");
            }
            CliError::Composite(CompositeError::MissingAsset { .. }) => {
                eprintln!();
                eprintln!("Pass --assets-dir or set [composite] assets_dir in the config file.");
            }
            CliError::Config { path, .. } => {
                eprintln!();
                eprintln!("Config file: {}", path.display());
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config { error, .. } => write!(f, "Configuration error: {}", error),
            CliError::Index(e) => write!(f, "Course index error: {}", e),
            CliError::Manifest(e) => write!(f, "Manifest error: {}", e),
            CliError::Composite(e) => write!(f, "Composite error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config { error, .. } => Some(error),
            CliError::Index(e) => Some(e),
            CliError::Manifest(e) => Some(e),
            CliError::Composite(e) => Some(e),
            CliError::LoggingInit(_) => None,
        }
    }
}

impl From<IndexError> for CliError {
    fn from(e: IndexError) -> Self {
        CliError::Index(e)
    }
}

impl From<ManifestError> for CliError {
    fn from(e: ManifestError) -> Self {
        CliError::Manifest(e)
    }
}

impl From<CompositeError> for CliError {
    fn from(e: CompositeError) -> Self {
        CliError::Composite(e)
    }
}
