//! Command handlers.
//!
//! Each handler implements `CommandHandler` and talks to the library only
//! through the `CourseService` in its context.

use scormpack::INDEX_FILENAME;

use super::args::{CompositeArgs, IndexArgs, InitArgs, ListArgs, ManifestArgs};
use super::traits::{CommandContext, CommandHandler};
use crate::error::CliError;

// ============================================================================
// Index Handler
// ============================================================================

/// Handler for the `index` command.
pub struct IndexHandler;

impl CommandHandler for IndexHandler {
    type Args = IndexArgs;

    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError> {
        let entries = ctx.courses.rescan(&args.course_dir)?;

        ctx.output.println(&format!(
            "Indexed {} course(s) in {}",
            entries.len(),
            args.course_dir.join(INDEX_FILENAME).display()
        ));
        for entry in &entries {
            ctx.output.indented(&format!("{:<24} {}", entry.name, entry.path));
        }

        Ok(())
    }
}

// ============================================================================
// List Handler
// ============================================================================

/// Handler for the `list` command.
pub struct ListHandler;

impl CommandHandler for ListHandler {
    type Args = ListArgs;

    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError> {
        let Some(entries) = ctx.courses.read_index(&args.course_dir)? else {
            ctx.output.println(&format!(
                "No {} in {}",
                INDEX_FILENAME,
                args.course_dir.display()
            ));
            ctx.output.println("Run 'scormpack index' to create it.");
            return Ok(());
        };

        if entries.is_empty() {
            ctx.output.println("No courses indexed.");
            return Ok(());
        }

        for entry in &entries {
            ctx.output.println(&format!("{:<24} {}", entry.name, entry.path));
        }
        ctx.output.newline();
        ctx.output.println(&format!("{} course(s)", entries.len()));

        Ok(())
    }
}

// ============================================================================
// Manifest Handler
// ============================================================================

/// Handler for the `manifest` command.
pub struct ManifestHandler;

impl CommandHandler for ManifestHandler {
    type Args = ManifestArgs;

    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError> {
        let manifest_path =
            ctx.courses
                .create_manifest(&args.path, args.name.as_deref(), &args.entry)?;

        ctx.output
            .println(&format!("Wrote {}", manifest_path.display()));
        Ok(())
    }
}

// ============================================================================
// Composite Handler
// ============================================================================

/// Handler for the `composite` command.
pub struct CompositeHandler;

impl CommandHandler for CompositeHandler {
    type Args = CompositeArgs;

    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError> {
        let summary = ctx.courses.assemble_composite(&args)?;

        ctx.output.println(&format!(
            "Assembled composite course at {}",
            args.path.display()
        ));
        if !summary.merged.is_empty() {
            ctx.output
                .indented(&format!("Merged:  {}", summary.merged.join(", ")));
        }
        if !summary.pruned.is_empty() {
            ctx.output
                .indented(&format!("Pruned:  {}", summary.pruned.join(", ")));
        }
        for skipped in &summary.skipped {
            ctx.output
                .indented(&format!("Skipped: {}", skipped.display()));
        }
        ctx.output
            .indented(&format!("Courses: {}", summary.course_count));
        ctx.output
            .indented(&format!("Manifest: {}", summary.manifest_path.display()));

        Ok(())
    }
}

// ============================================================================
// Init Handler
// ============================================================================

/// Handler for the `init` command.
pub struct InitHandler;

impl CommandHandler for InitHandler {
    type Args = InitArgs;

    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError> {
        if ctx.courses.init_config(&args.config_path)? {
            ctx.output.println("Created configuration file:");
        } else {
            ctx.output.println("Configuration file already exists:");
        }
        ctx.output.indented(&args.config_path.display().to_string());
        Ok(())
    }
}
