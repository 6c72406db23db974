//! Argument types and CLI definitions for scormpack commands.
//!
//! `Commands` is the clap-derived surface; the `*Args` structs are what
//! handlers receive after configuration defaults have been applied.

use std::path::PathBuf;

use clap::Subcommand;
use scormpack::config::ConfigFile;

#[derive(Subcommand)]
pub enum Commands {
    /// Rescan a courses directory and rewrite its index.json
    Index {
        /// Directory containing one subdirectory per course
        /// (default: [index] courses_dir)
        course_dir: Option<PathBuf>,
    },

    /// Print the entries of an existing index.json
    List {
        /// Directory containing index.json (default: [index] courses_dir)
        course_dir: Option<PathBuf>,
    },

    /// Generate imsmanifest.xml for a course directory
    Manifest {
        /// Course directory
        path: PathBuf,

        /// Course title (default: directory name)
        #[arg(long)]
        name: Option<String>,

        /// Launch document, relative to the course directory
        /// (default: [manifest] entry)
        #[arg(long)]
        entry: Option<String>,
    },

    /// Merge sub-courses into a composite course
    Composite {
        /// Composite course directory (created if missing)
        path: PathBuf,

        /// Sub-course directories to copy in
        #[arg(required = true)]
        sub_courses: Vec<PathBuf>,

        /// Composite title (default: directory name)
        #[arg(long)]
        name: Option<String>,

        /// Directory holding the player shell (default: [composite] assets_dir)
        #[arg(long)]
        assets_dir: Option<PathBuf>,
    },

    /// Write the default configuration file if none exists
    Init,
}

/// Arguments for the `index` command.
#[derive(Debug, Clone)]
pub struct IndexArgs {
    pub course_dir: PathBuf,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone)]
pub struct ListArgs {
    pub course_dir: PathBuf,
}

/// Arguments for the `manifest` command.
#[derive(Debug, Clone)]
pub struct ManifestArgs {
    pub path: PathBuf,
    pub name: Option<String>,
    pub entry: String,
}

/// Arguments for the `composite` command.
#[derive(Debug, Clone)]
pub struct CompositeArgs {
    pub path: PathBuf,
    pub sub_courses: Vec<PathBuf>,
    pub name: Option<String>,
    pub assets_dir: PathBuf,
    pub assets: Vec<String>,
}

impl CompositeArgs {
    /// Fill in what the command line left out from `config`.
    ///
    /// The composite manifest always launches the player shell, so
    /// `[manifest] entry` does not apply here.
    pub fn from_config(
        path: PathBuf,
        sub_courses: Vec<PathBuf>,
        name: Option<String>,
        assets_dir: Option<PathBuf>,
        config: &ConfigFile,
    ) -> Self {
        Self {
            path,
            sub_courses,
            name,
            assets_dir: assets_dir.unwrap_or_else(|| config.composite.assets_dir.clone()),
            assets: config.composite.assets.clone(),
        }
    }
}

/// Arguments for the `init` command.
#[derive(Debug, Clone)]
pub struct InitArgs {
    pub config_path: PathBuf,
}
