//! CLI commands.
//!
//! Command Pattern with trait-based dependency injection:
//!
//! - `traits`: core interfaces (`Output`, `CourseService`, `CommandHandler`)
//! - `services`: production implementations of the traits
//! - `args`: clap-derived command surface and per-handler argument types
//! - `handlers`: one handler per command
//!
//! # Example
//!
//! ```ignore
//! let output = ConsoleOutput::new();
//! let courses = DefaultCourseService::new();
//! let ctx = CommandContext::new(&output, &courses);
//! ListHandler::execute(ListArgs { course_dir }, &ctx)?;
//! ```

mod args;
mod handlers;
mod services;
mod traits;

#[cfg(test)]
mod tests;

use std::path::Path;

pub use args::Commands;
pub use handlers::{CompositeHandler, IndexHandler, InitHandler, ListHandler, ManifestHandler};
pub use services::{ConsoleOutput, DefaultCourseService};
pub use traits::CommandHandler;

use args::{CompositeArgs, IndexArgs, InitArgs, ListArgs, ManifestArgs};
use scormpack::config::ConfigFile;
use traits::CommandContext;

use crate::error::CliError;

/// Run a command with the production context.
///
/// Arguments not given on the command line fall back to `config`.
pub fn run(command: Commands, config: &ConfigFile, config_path: &Path) -> Result<(), CliError> {
    let output = ConsoleOutput::new();
    let courses = DefaultCourseService::new();
    let ctx = CommandContext::new(&output, &courses);

    match command {
        Commands::Index { course_dir } => IndexHandler::execute(
            IndexArgs {
                course_dir: course_dir.unwrap_or_else(|| config.index.courses_dir.clone()),
            },
            &ctx,
        ),

        Commands::List { course_dir } => ListHandler::execute(
            ListArgs {
                course_dir: course_dir.unwrap_or_else(|| config.index.courses_dir.clone()),
            },
            &ctx,
        ),

        Commands::Manifest { path, name, entry } => ManifestHandler::execute(
            ManifestArgs {
                path,
                name,
                entry: entry.unwrap_or_else(|| config.manifest.entry.clone()),
            },
            &ctx,
        ),

        Commands::Composite {
            path,
            sub_courses,
            name,
            assets_dir,
        } => CompositeHandler::execute(
            CompositeArgs::from_config(path, sub_courses, name, assets_dir, config),
            &ctx,
        ),

        Commands::Init => InitHandler::execute(
            InitArgs {
                config_path: config_path.to_path_buf(),
            },
            &ctx,
        ),
    }
}
