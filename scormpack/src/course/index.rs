//! The `index.json` course index.
//!
//! An index is bound to the directory that holds the courses. Entries are
//! keyed by name and kept in insertion order; adding a name that already
//! exists drops the old entry and appends the new one.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::entry::CourseEntry;
use super::error::{IndexError, IndexResult};
use crate::fsutil::sorted_subdirectories;
use crate::manifest::{resolve_course, ResolveError};
use crate::INDEX_FILENAME;

/// On-disk shape of `index.json`.
#[derive(Serialize)]
struct IndexDocument<'a> {
    courses: &'a [CourseEntry],
}

/// Ordered, name-keyed collection of courses for one directory.
#[derive(Debug, Clone)]
pub struct CourseIndex {
    /// Directory holding the courses and the index file.
    dir: PathBuf,

    /// Entries in insertion order.
    courses: Vec<CourseEntry>,
}

impl CourseIndex {
    /// Create an empty index bound to `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            courses: Vec::new(),
        }
    }

    /// Create an index bound to `dir` and load its `index.json` if present.
    pub fn open(dir: impl Into<PathBuf>) -> IndexResult<Self> {
        let mut index = Self::new(dir);
        index.load()?;
        Ok(index)
    }

    /// Directory the index belongs to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Default location of the index file.
    pub fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILENAME)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Snapshot of the entries in order.
    ///
    /// The snapshot is owned, so it can be iterated while the index is
    /// mutated.
    pub fn entries(&self) -> Vec<CourseEntry> {
        self.courses.clone()
    }

    /// Find an entry by name.
    pub fn find(&self, name: &str) -> Option<&CourseEntry> {
        self.courses.iter().find(|c| c.name == name)
    }

    /// Check if an entry with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Add or replace an entry.
    ///
    /// Any entry with the same name is removed first, so the new entry always
    /// ends up last.
    pub fn add(&mut self, entry: CourseEntry) {
        self.remove(&entry.name);
        self.courses.push(entry);
    }

    /// Remove the entry with this name.
    ///
    /// Returns true if an entry was found and removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.courses.iter().position(|c| c.name == name) {
            Some(idx) => {
                self.courses.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.courses.clear();
    }

    /// Load entries from the default index file.
    ///
    /// See [`CourseIndex::load_from`].
    pub fn load(&mut self) -> IndexResult<bool> {
        let path = self.index_path();
        self.load_from(&path)
    }

    /// Add the entries stored in `path` to this index.
    ///
    /// Returns `false` if the file does not exist. Elements without string
    /// `name` and `path` fields are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not JSON, or has no
    /// `courses` array.
    pub fn load_from(&mut self, path: &Path) -> IndexResult<bool> {
        if !path.exists() {
            debug!(path = %path.display(), "No index file to load");
            return Ok(false);
        }

        let content = fs::read_to_string(path).map_err(|e| IndexError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        let document: Value =
            serde_json::from_str(&content).map_err(|e| IndexError::ParseFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        let courses = document
            .get("courses")
            .and_then(Value::as_array)
            .ok_or_else(|| IndexError::InvalidFormat {
                path: path.to_path_buf(),
                reason: "missing \"courses\" array".to_string(),
            })?;

        for (position, item) in courses.iter().enumerate() {
            match serde_json::from_value::<CourseEntry>(item.clone()) {
                Ok(entry) => self.add(entry),
                Err(e) => warn!(
                    index = %path.display(),
                    position,
                    error = %e,
                    "Skipping invalid index entry"
                ),
            }
        }

        Ok(true)
    }

    /// Write the index to its default location.
    pub fn save(&self) -> IndexResult<()> {
        let path = self.index_path();
        self.save_to(&path)
    }

    /// Write the index to `path`, overwriting the file.
    pub fn save_to(&self, path: &Path) -> IndexResult<()> {
        let document = IndexDocument {
            courses: &self.courses,
        };
        let mut content =
            serde_json::to_string_pretty(&document).map_err(|e| IndexError::WriteFailed {
                path: path.to_path_buf(),
                source: e.into(),
            })?;
        content.push('\n');

        fs::write(path, content).map_err(|e| IndexError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(index = %path.display(), courses = self.courses.len(), "Wrote course index");
        Ok(())
    }

    /// Rebuild the index from the subdirectories of the index directory.
    ///
    /// See [`CourseIndex::rescan_dir`].
    pub fn rescan(&mut self) -> IndexResult<usize> {
        let dir = self.dir.clone();
        self.rescan_dir(&dir)
    }

    /// Clear the index and add every valid course directly under `dir`.
    ///
    /// Subdirectories are processed in name order. Courses that do not
    /// qualify are logged and skipped. Returns the number of courses added.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be listed or a manifest is unreadable
    /// or malformed.
    pub fn rescan_dir(&mut self, dir: &Path) -> IndexResult<usize> {
        self.clear();

        let subdirs = sorted_subdirectories(dir).map_err(|e| IndexError::ReadFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut added = 0;
        for course_path in subdirs {
            if self.ingest_one(&course_path)? {
                added += 1;
            }
        }

        info!(dir = %dir.display(), courses = added, "Rescanned courses");
        Ok(added)
    }

    /// Resolve one course directory and add it if it qualifies.
    ///
    /// Returns whether the course was added.
    pub fn ingest_one(&mut self, course_path: &Path) -> IndexResult<bool> {
        match resolve_course(course_path) {
            Ok(entry) => {
                debug!(name = %entry.name, path = %entry.path, "Indexed course");
                self.add(entry);
                Ok(true)
            }
            Err(e) if e.is_skip() => {
                log_skip(&e);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn log_skip(reason: &ResolveError) {
    warn!("Ignoring course: {}", reason);
}
