//! Core traits for the command handler pattern.
//!
//! Handlers depend on these interfaces only, so they can run against mocks.

use std::path::{Path, PathBuf};

use scormpack::composite::AssemblySummary;
use scormpack::course::CourseEntry;

use super::args::CompositeArgs;
use crate::error::CliError;

// ============================================================================
// Output Trait - Abstracts console output
// ============================================================================

/// Trait for outputting messages to the user.
pub trait Output: Send + Sync {
    /// Print a line of text.
    fn println(&self, message: &str);

    /// Print an empty line.
    fn newline(&self) {
        self.println("");
    }

    /// Print an indented line.
    fn indented(&self, message: &str) {
        self.println(&format!("  {}", message));
    }
}

// ============================================================================
// Course Service Trait - Abstracts library operations
// ============================================================================

/// Trait for the library operations the commands perform.
pub trait CourseService: Send + Sync {
    /// Rescan `course_dir`, write its index and return the new entries.
    fn rescan(&self, course_dir: &Path) -> Result<Vec<CourseEntry>, CliError>;

    /// Read the index in `course_dir`, or `None` if it has no index file.
    fn read_index(&self, course_dir: &Path) -> Result<Option<Vec<CourseEntry>>, CliError>;

    /// Write the manifest of a course and return its path.
    fn create_manifest(
        &self,
        course_path: &Path,
        name: Option<&str>,
        entry: &str,
    ) -> Result<PathBuf, CliError>;

    /// Assemble a composite course.
    fn assemble_composite(&self, args: &CompositeArgs) -> Result<AssemblySummary, CliError>;

    /// Write a default config file at `path` unless one exists.
    ///
    /// Returns whether a file was written.
    fn init_config(&self, path: &Path) -> Result<bool, CliError>;
}

// ============================================================================
// Command Context - Bundles dependencies for handlers
// ============================================================================

/// Context providing dependencies to command handlers.
pub struct CommandContext<'a> {
    /// Output interface for user messages.
    pub output: &'a dyn Output,

    /// Library operations.
    pub courses: &'a dyn CourseService,
}

impl<'a> CommandContext<'a> {
    /// Create a new command context.
    pub fn new(output: &'a dyn Output, courses: &'a dyn CourseService) -> Self {
        Self { output, courses }
    }
}

// ============================================================================
// Command Handler Trait
// ============================================================================

/// Trait for command handlers.
pub trait CommandHandler {
    /// The arguments type for this handler.
    type Args;

    /// Execute the command with the given arguments and context.
    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError>;
}
