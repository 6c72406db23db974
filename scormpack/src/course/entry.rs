//! A single course in the index.

use serde::{Deserialize, Serialize};

/// One course in an `index.json`.
///
/// `name` is the course directory's basename and the key of the index.
/// `path` is a percent-encoded URL of the entry document, relative to the
/// directory holding the index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseEntry {
    /// Course directory name.
    pub name: String,
    /// Entry document URL relative to the index directory.
    pub path: String,
}

impl CourseEntry {
    /// Create a new entry.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}
