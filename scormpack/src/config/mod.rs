//! User configuration loaded from `~/.scormpack/config.ini`.
//!
//! # Example
//!
//! ```no_run
//! use scormpack::config::ConfigFile;
//!
//! let config = ConfigFile::load().unwrap();
//! println!("courses: {}", config.index.courses_dir.display());
//! ```

mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    CompositeSettings, ConfigFile, IndexSettings, LoggingSettings, ManifestSettings,
    DEFAULT_ASSETS_DIR, DEFAULT_COURSES_DIR,
};
