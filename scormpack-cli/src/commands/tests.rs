//! Tests for command handlers, using mock output and course services.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use scormpack::composite::AssemblySummary;
use scormpack::course::{CourseEntry, IndexError};

use super::args::*;
use super::handlers::*;
use super::traits::*;
use crate::error::CliError;

// ============================================================================
// Mock Output Implementation
// ============================================================================

/// Mock output that captures all messages for verification.
#[derive(Default)]
pub struct MockOutput {
    messages: RwLock<Vec<String>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any message contains the given substring.
    pub fn contains(&self, substring: &str) -> bool {
        self.messages
            .read()
            .unwrap()
            .iter()
            .any(|m| m.contains(substring))
    }

    /// Get the full output as a single string.
    pub fn full_output(&self) -> String {
        self.messages.read().unwrap().join("\n")
    }
}

impl Output for MockOutput {
    fn println(&self, message: &str) {
        self.messages.write().unwrap().push(message.to_string());
    }
}

// ============================================================================
// Mock Course Service Implementation
// ============================================================================

/// Mock course service returning canned results and recording calls.
#[derive(Default)]
pub struct MockCourseService {
    entries: Option<Vec<CourseEntry>>,
    summary: AssemblySummary,
    config_exists: bool,
    fail: bool,
    calls: RwLock<Vec<String>>,
}

impl MockCourseService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, entries: Vec<CourseEntry>) -> Self {
        self.entries = Some(entries);
        self
    }

    pub fn with_summary(mut self, summary: AssemblySummary) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_existing_config(mut self) -> Self {
        self.config_exists = true;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn record(&self, call: String) {
        self.calls.write().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    fn failure(path: &Path) -> CliError {
        CliError::Index(IndexError::ReadFailed {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        })
    }
}

impl CourseService for MockCourseService {
    fn rescan(&self, course_dir: &Path) -> Result<Vec<CourseEntry>, CliError> {
        self.record(format!("rescan {}", course_dir.display()));
        if self.fail {
            return Err(Self::failure(course_dir));
        }
        Ok(self.entries.clone().unwrap_or_default())
    }

    fn read_index(&self, course_dir: &Path) -> Result<Option<Vec<CourseEntry>>, CliError> {
        self.record(format!("read_index {}", course_dir.display()));
        if self.fail {
            return Err(Self::failure(course_dir));
        }
        Ok(self.entries.clone())
    }

    fn create_manifest(
        &self,
        course_path: &Path,
        name: Option<&str>,
        entry: &str,
    ) -> Result<PathBuf, CliError> {
        self.record(format!(
            "create_manifest {} {:?} {}",
            course_path.display(),
            name,
            entry
        ));
        Ok(course_path.join("imsmanifest.xml"))
    }

    fn assemble_composite(&self, args: &CompositeArgs) -> Result<AssemblySummary, CliError> {
        self.record(format!(
            "assemble {} {}",
            args.path.display(),
            args.sub_courses.len()
        ));
        Ok(self.summary.clone())
    }

    fn init_config(&self, path: &Path) -> Result<bool, CliError> {
        self.record(format!("init_config {}", path.display()));
        Ok(!self.config_exists)
    }
}

fn entry(name: &str) -> CourseEntry {
    CourseEntry::new(name, format!("{}/index.html", name))
}

// ============================================================================
// Index Handler Tests
// ============================================================================

#[test]
fn test_index_reports_count_and_entries() {
    let output = MockOutput::new();
    let courses = MockCourseService::new().with_entries(vec![entry("alpha"), entry("gamma")]);
    let ctx = CommandContext::new(&output, &courses);

    IndexHandler::execute(
        IndexArgs {
            course_dir: PathBuf::from("/srv/courses"),
        },
        &ctx,
    )
    .unwrap();

    assert!(output.contains("Indexed 2 course(s) in /srv/courses/index.json"));
    assert!(output.contains("alpha/index.html"));
    assert!(output.contains("gamma/index.html"));
    assert_eq!(courses.calls(), vec!["rescan /srv/courses"]);
}

#[test]
fn test_index_propagates_errors() {
    let output = MockOutput::new();
    let courses = MockCourseService::new().failing();
    let ctx = CommandContext::new(&output, &courses);

    let result = IndexHandler::execute(
        IndexArgs {
            course_dir: PathBuf::from("/srv/courses"),
        },
        &ctx,
    );

    assert!(matches!(result, Err(CliError::Index(_))));
    assert!(!output.contains("Indexed"));
}

// ============================================================================
// List Handler Tests
// ============================================================================

#[test]
fn test_list_prints_entries_in_order() {
    let output = MockOutput::new();
    let courses = MockCourseService::new().with_entries(vec![entry("zeta"), entry("alpha")]);
    let ctx = CommandContext::new(&output, &courses);

    ListHandler::execute(
        ListArgs {
            course_dir: PathBuf::from("courses"),
        },
        &ctx,
    )
    .unwrap();

    let text = output.full_output();
    let zeta = text.find("zeta").unwrap();
    let alpha = text.find("alpha").unwrap();
    assert!(zeta < alpha);
    assert!(output.contains("2 course(s)"));
}

#[test]
fn test_list_without_index() {
    let output = MockOutput::new();
    let courses = MockCourseService::new();
    let ctx = CommandContext::new(&output, &courses);

    ListHandler::execute(
        ListArgs {
            course_dir: PathBuf::from("courses"),
        },
        &ctx,
    )
    .unwrap();

    assert!(output.contains("No index.json in courses"));
    assert!(output.contains("scormpack index"));
}

#[test]
fn test_list_empty_index() {
    let output = MockOutput::new();
    let courses = MockCourseService::new().with_entries(Vec::new());
    let ctx = CommandContext::new(&output, &courses);

    ListHandler::execute(
        ListArgs {
            course_dir: PathBuf::from("courses"),
        },
        &ctx,
    )
    .unwrap();

    assert!(output.contains("No courses indexed."));
}

// ============================================================================
// Manifest Handler Tests
// ============================================================================

#[test]
fn test_manifest_passes_name_and_entry() {
    let output = MockOutput::new();
    let courses = MockCourseService::new();
    let ctx = CommandContext::new(&output, &courses);

    ManifestHandler::execute(
        ManifestArgs {
            path: PathBuf::from("course"),
            name: Some("Safety".to_string()),
            entry: "start.html".to_string(),
        },
        &ctx,
    )
    .unwrap();

    assert_eq!(
        courses.calls(),
        vec![r#"create_manifest course Some("Safety") start.html"#]
    );
    assert!(output.contains("Wrote course/imsmanifest.xml"));
}

// ============================================================================
// Composite Handler Tests
// ============================================================================

#[test]
fn test_composite_prints_summary() {
    let output = MockOutput::new();
    let courses = MockCourseService::new().with_summary(AssemblySummary {
        pruned: vec!["old".to_string()],
        merged: vec!["sub1".to_string(), "sub2".to_string()],
        skipped: vec![PathBuf::from("notes")],
        course_count: 3,
        manifest_path: PathBuf::from("composite/imsmanifest.xml"),
    });
    let ctx = CommandContext::new(&output, &courses);

    CompositeHandler::execute(
        CompositeArgs {
            path: PathBuf::from("composite"),
            sub_courses: vec![
                PathBuf::from("sub1"),
                PathBuf::from("sub2"),
                PathBuf::from("notes"),
            ],
            name: None,
            assets_dir: PathBuf::from("run/composite"),
            assets: vec!["index.html".to_string()],
        },
        &ctx,
    )
    .unwrap();

    assert_eq!(courses.calls(), vec!["assemble composite 3"]);
    assert!(output.contains("Merged:  sub1, sub2"));
    assert!(output.contains("Pruned:  old"));
    assert!(output.contains("Skipped: notes"));
    assert!(output.contains("Courses: 3"));
}

// ============================================================================
// Init Handler Tests
// ============================================================================

#[test]
fn test_init_creates_config() {
    let output = MockOutput::new();
    let courses = MockCourseService::new();
    let ctx = CommandContext::new(&output, &courses);

    InitHandler::execute(
        InitArgs {
            config_path: PathBuf::from("/home/u/.scormpack/config.ini"),
        },
        &ctx,
    )
    .unwrap();

    assert!(output.contains("Created configuration file:"));
    assert!(output.contains("/home/u/.scormpack/config.ini"));
}

#[test]
fn test_init_keeps_existing_config() {
    let output = MockOutput::new();
    let courses = MockCourseService::new().with_existing_config();
    let ctx = CommandContext::new(&output, &courses);

    InitHandler::execute(
        InitArgs {
            config_path: PathBuf::from("config.ini"),
        },
        &ctx,
    )
    .unwrap();

    assert!(output.contains("already exists"));
}

// ============================================================================
// Production Service Tests
// ============================================================================

mod default_service {
    use super::super::services::DefaultCourseService;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_index_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let service = DefaultCourseService::new();
        assert!(service.read_index(temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_init_config_writes_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        let service = DefaultCourseService::new();

        assert!(service.init_config(&path).unwrap());
        assert!(path.is_file());
        assert!(!service.init_config(&path).unwrap());
    }

    #[test]
    fn test_composite_ignores_manifest_entry_setting() {
        use scormpack::config::ConfigFile;
        use scormpack::manifest::{create_manifest, resolve_course};
        use std::fs;

        let temp = TempDir::new().unwrap();
        let shell = temp.path().join("shell");
        fs::create_dir_all(shell.join("js")).unwrap();
        for item in ["index.html", "lernmar.svg", "main.css", "js/player.js"] {
            fs::write(shell.join(item), item).unwrap();
        }
        let sub1 = temp.path().join("sub1");
        fs::create_dir_all(&sub1).unwrap();
        fs::write(sub1.join("start.html"), "<html/>").unwrap();
        create_manifest(&sub1, None, Some("start.html")).unwrap();

        let mut config = ConfigFile::default();
        config.manifest.entry = "start.html".to_string();
        config.composite.assets_dir = shell;
        let out = temp.path().join("out");
        let args = CompositeArgs::from_config(out.clone(), vec![sub1], None, None, &config);

        let summary = DefaultCourseService::new()
            .assemble_composite(&args)
            .unwrap();

        assert_eq!(summary.merged, vec!["sub1"]);
        assert_eq!(resolve_course(&out).unwrap().path, "out/index.html");
    }

    #[test]
    fn test_manifest_for_missing_course_fails() {
        let temp = TempDir::new().unwrap();
        let service = DefaultCourseService::new();
        let result = service.create_manifest(&temp.path().join("missing"), None, "index.html");
        assert!(matches!(result, Err(CliError::Manifest(_))));
    }
}
