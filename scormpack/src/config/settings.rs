//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;

use crate::composite::DEFAULT_ASSET_ITEMS;
use crate::logging::LogLevel;
use crate::manifest::DEFAULT_ENTRY;

/// Default courses directory for `scormpack index`, relative to the
/// working directory.
pub const DEFAULT_COURSES_DIR: &str = "dist/player/courses";

/// Default directory holding the composite runtime assets.
pub const DEFAULT_ASSETS_DIR: &str = "run/composite";

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Course index settings
    pub index: IndexSettings,
    /// Manifest generation settings
    pub manifest: ManifestSettings,
    /// Composite assembly settings
    pub composite: CompositeSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// `[index]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSettings {
    /// Directory rescanned when no directory is given on the command line
    pub courses_dir: PathBuf,
}

/// `[manifest]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSettings {
    /// Entry document used when `--entry` is not given
    pub entry: String,
}

/// `[composite]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeSettings {
    /// Directory the runtime assets are copied from
    pub assets_dir: PathBuf,
    /// Asset files and directories to copy
    pub assets: Vec<String>,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Level used when RUST_LOG is unset
    pub level: LogLevel,
    /// Optional log file mirroring stderr output
    pub file: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            index: IndexSettings {
                courses_dir: PathBuf::from(DEFAULT_COURSES_DIR),
            },
            manifest: ManifestSettings {
                entry: DEFAULT_ENTRY.to_string(),
            },
            composite: CompositeSettings {
                assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
                assets: DEFAULT_ASSET_ITEMS.iter().map(|s| s.to_string()).collect(),
            },
            logging: LoggingSettings {
                level: LogLevel::default(),
                file: None,
            },
        }
    }
}
