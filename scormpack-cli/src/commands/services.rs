//! Concrete implementations of the service traits.

use std::path::{Path, PathBuf};

use scormpack::composite::{AssemblySummary, CompositeAssembler, CompositeAssets};
use scormpack::config::ConfigFile;
use scormpack::course::{CourseEntry, CourseIndex};
use scormpack::manifest::ManifestBuilder;

use super::args::CompositeArgs;
use super::traits::{CourseService, Output};
use crate::error::CliError;

/// Standard console output implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    /// Create a new console output.
    pub fn new() -> Self {
        Self
    }
}

impl Output for ConsoleOutput {
    fn println(&self, message: &str) {
        println!("{}", message);
    }
}

/// Course service backed by the scormpack library.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCourseService;

impl DefaultCourseService {
    /// Create a new course service.
    pub fn new() -> Self {
        Self
    }
}

impl CourseService for DefaultCourseService {
    fn rescan(&self, course_dir: &Path) -> Result<Vec<CourseEntry>, CliError> {
        let mut index = CourseIndex::new(course_dir);
        index.rescan()?;
        index.save()?;
        Ok(index.entries())
    }

    fn read_index(&self, course_dir: &Path) -> Result<Option<Vec<CourseEntry>>, CliError> {
        let mut index = CourseIndex::new(course_dir);
        if !index.load()? {
            return Ok(None);
        }
        Ok(Some(index.entries()))
    }

    fn create_manifest(
        &self,
        course_path: &Path,
        name: Option<&str>,
        entry: &str,
    ) -> Result<PathBuf, CliError> {
        let mut builder = ManifestBuilder::new().with_entry(entry);
        if let Some(name) = name {
            builder = builder.with_name(name);
        }
        Ok(builder.build(course_path)?)
    }

    fn assemble_composite(&self, args: &CompositeArgs) -> Result<AssemblySummary, CliError> {
        let assets = CompositeAssets::new(&args.assets_dir).with_items(args.assets.iter());
        let assembler = CompositeAssembler::new(assets);
        Ok(assembler.assemble(&args.path, &args.sub_courses, args.name.as_deref())?)
    }

    fn init_config(&self, path: &Path) -> Result<bool, CliError> {
        ConfigFile::ensure_exists(path).map_err(|error| CliError::Config {
            path: path.to_path_buf(),
            error,
        })
    }
}
