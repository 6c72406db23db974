//! Deterministic enumeration of the files that make up a course.

use std::fs;
use std::path::Path;

use glob::{MatchOptions, Pattern};
use tracing::debug;

use super::error::{ManifestError, ManifestResult};
use crate::MANIFEST_FILENAME;

/// Match options for exclusion patterns: `*` stays within one path segment.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Walks a course directory and lists its files as posix-relative paths.
///
/// Children of every directory are visited in name order, so the result only
/// depends on the tree's contents. The top-level manifest is never listed.
/// Extra exclusion patterns are matched against the relative path; an
/// excluded directory drops its whole subtree.
#[derive(Debug, Clone, Default)]
pub struct ResourceTree {
    excluding: Vec<Pattern>,
}

impl ResourceTree {
    /// A tree walker that excludes only the top-level manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree walker that also excludes paths matching `patterns` (globs).
    pub fn excluding<I, S>(patterns: I) -> ManifestResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excluding = patterns
            .into_iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|e| ManifestError::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    reason: e.msg.to_string(),
                })
            })
            .collect::<ManifestResult<Vec<_>>>()?;
        Ok(Self { excluding })
    }

    /// List every regular file under `course_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::NotADirectory`] if `course_path` is missing or
    /// not a directory, and [`ManifestError::ReadFailed`] if a directory
    /// cannot be listed.
    pub fn build(&self, course_path: &Path) -> ManifestResult<Vec<String>> {
        if !course_path.is_dir() {
            return Err(ManifestError::NotADirectory(course_path.to_path_buf()));
        }

        let mut files = Vec::new();
        self.walk(course_path, "", &mut files)?;
        debug!(
            course = %course_path.display(),
            files = files.len(),
            "Enumerated course resources"
        );
        Ok(files)
    }

    fn walk(&self, dir: &Path, prefix: &str, files: &mut Vec<String>) -> ManifestResult<()> {
        let read_failed = |e| ManifestError::ReadFailed {
            path: dir.to_path_buf(),
            source: e,
        };

        let mut children = fs::read_dir(dir)
            .map_err(read_failed)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_failed)?;
        children.sort();

        for child in children {
            let name = child.to_string_lossy();
            let relative = if prefix.is_empty() {
                name.into_owned()
            } else {
                format!("{}/{}", prefix, name)
            };

            if self.is_excluded(&relative) {
                continue;
            }

            let path = dir.join(&child);
            if path.is_dir() {
                self.walk(&path, &relative, files)?;
            } else if path.is_file() {
                files.push(relative);
            }
        }
        Ok(())
    }

    fn is_excluded(&self, relative: &str) -> bool {
        relative == MANIFEST_FILENAME
            || self
                .excluding
                .iter()
                .any(|pattern| pattern.matches_with(relative, MATCH_OPTIONS))
    }
}
