//! Error types for the course index.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::manifest::ResolveError;

/// Result type for course index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that abort an index operation.
///
/// Courses that merely do not qualify never surface here; they are logged
/// and skipped.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to read the index file or list a directory.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write the index file.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    /// The index file is not valid JSON.
    #[error("failed to parse {}: {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The index file is JSON but has no `courses` array.
    #[error("invalid index {}: {reason}", path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    /// A course manifest could not be read at all.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_failed_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = IndexError::ParseFailed {
            path: PathBuf::from("/courses/index.json"),
            source,
        };
        assert!(err.to_string().contains("/courses/index.json"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_resolve_is_transparent() {
        let err = IndexError::from(ResolveError::MalformedManifest {
            path: PathBuf::from("/courses/a/imsmanifest.xml"),
            reason: "bad".to_string(),
        });
        assert!(err.to_string().starts_with("malformed manifest"));
    }
}
