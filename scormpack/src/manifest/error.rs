//! Error types for the manifest module.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for manifest href resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Result type for manifest generation.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Reasons a course directory could not be turned into an index entry.
///
/// Everything except [`ResolveError::MalformedManifest`] and
/// [`ResolveError::ReadFailed`] means "skip this course"; see
/// [`ResolveError::is_skip`].
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The course directory has no `imsmanifest.xml`.
    #[error("no manifest in {}", .0.display())]
    NoManifest(PathBuf),

    /// The manifest exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// The manifest is not well-formed XML.
    #[error("malformed manifest {}: {reason}", path.display())]
    MalformedManifest { path: PathBuf, reason: String },

    /// No `resources/resource` element in the content packaging namespace.
    #[error("course {} has no resource element", .0.display())]
    NoResourceElement(PathBuf),

    /// The resource element carries no `href`.
    #[error("course {} has no reference to an entry document", .0.display())]
    NoHref(PathBuf),

    /// The `href` has a scheme or network location.
    #[error("course {} references a non-relative entry '{href}'", path.display())]
    AbsoluteReference { path: PathBuf, href: String },

    /// The `href` resolves outside the course directory.
    #[error("course {} references '{href}' outside the course directory", path.display())]
    PathEscapesCourse { path: PathBuf, href: String },

    /// The entry document named by `href` does not exist.
    #[error("course {} is missing its entry document {}", path.display(), entry.display())]
    MissingEntryFile { path: PathBuf, entry: PathBuf },
}

impl ResolveError {
    /// Whether this outcome only excludes the course rather than aborting.
    pub fn is_skip(&self) -> bool {
        !matches!(
            self,
            ResolveError::MalformedManifest { .. } | ResolveError::ReadFailed { .. }
        )
    }
}

/// Errors raised while generating a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The course directory does not exist.
    #[error("cannot access course in {}", .0.display())]
    CourseNotFound(PathBuf),

    /// The entry document does not exist inside the course.
    #[error("cannot find entry document in {}", .0.display())]
    EntryNotFound(PathBuf),

    /// Resource enumeration was pointed at something that is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// An exclusion pattern could not be compiled.
    #[error("invalid exclusion pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Failed to read a directory while enumerating resources.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write the manifest file.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    /// XML serialization failed.
    #[error("failed to serialize manifest: {0}")]
    Xml(String),
}
